//! Error types for the releve-core library.

use thiserror::Error;

/// Main error type for the releve library.
#[derive(Error, Debug)]
pub enum ReleveError {
    /// Authentication against the portal failed.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// The bill-history page could not be fetched.
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// A billing block could not be extracted.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// HTTP client error outside of login and page fetches.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while authenticating against the portal.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The portal served the login form again: credentials rejected.
    #[error("credentials rejected by the portal")]
    BadCredentials,

    /// The login endpoint answered with an unexpected status.
    #[error("unexpected login response: HTTP {0}")]
    UnexpectedStatus(u16),

    /// Transport failure while submitting the login form.
    #[error("transport failure during login: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Errors raised while fetching the bill-history page.
///
/// The pipeline downgrades these to "no bills available" instead of
/// propagating them.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Non-success HTTP status.
    #[error("HTTP {status} fetching {url}")]
    Status { url: String, status: u16 },

    /// Transport failure.
    #[error("transport failure fetching {url}: {source}")]
    Transport { url: String, source: reqwest::Error },
}

/// Errors raised while extracting a single billing block.
///
/// Recoverable: the extractor logs the block and moves on to the next one.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A required cell is absent from the block.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A required pattern did not match the cell text.
    #[error("pattern mismatch for {field}: {value:?}")]
    Pattern { field: &'static str, value: String },

    /// A cell could not be parsed into its target type.
    #[error("failed to parse {field}: {value:?}")]
    Parse { field: &'static str, value: String },
}

/// Result type for the releve library.
pub type Result<T> = std::result::Result<T, ReleveError>;
