//! Core library for the TotalEnergies customer-portal bill connector.
//!
//! This crate provides:
//! - portal session management (login form submission, cookie-backed fetches)
//! - bill-history page extraction (billing blocks and installment panels)
//! - record reconciliation into deduplicable bill records

pub mod dom;
pub mod error;
pub mod models;
pub mod scrape;
pub mod session;

pub use error::{AuthError, ExtractionError, FetchError, ReleveError, Result};
pub use models::bill::{BillRecord, FileAttributes, FileMetadata, VENDOR};
pub use models::config::ConnectorConfig;
pub use scrape::rules::{normalize_amount, normalize_date, Amount};
pub use scrape::{extract, fetch_bills, reconcile, Connector, Fragment, HistorySource, SubBill};
pub use session::PortalSession;
