//! Authenticated HTTP session against the customer portal.

use std::time::Duration;

use scraper::Html;
use tracing::debug;

use crate::error::{AuthError, FetchError, ReleveError};
use crate::models::config::ConnectorConfig;
use crate::scrape::HistorySource;

// Login form markers, as rendered on the portal's connection page.
const LOGIN_FORM_ID: &str = "fz-authentificationForm";
const LOGIN_FIELD: &str = "tx_demmauth_authentification[authentificationForm][login]";
const PASSWORD_FIELD: &str = "tx_demmauth_authentification[authentificationForm][password]";

/// Cookie-backed HTTP session with the customer portal.
pub struct PortalSession {
    client: reqwest::Client,
    login_url: String,
    history_url: String,
}

impl PortalSession {
    /// Build an HTTP client with a cookie jar for the portal.
    pub fn new(config: &ConnectorConfig) -> Result<Self, ReleveError> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            login_url: config.login_url(),
            history_url: config.history_url(),
        })
    }

    /// Submit the login form, establishing the session cookies.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), AuthError> {
        debug!("submitting login form to {}", self.login_url);

        let form = [(LOGIN_FIELD, username), (PASSWORD_FIELD, password)];
        let response = self.client.post(&self.login_url).form(&form).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::UnexpectedStatus(status.as_u16()));
        }

        // The portal answers 200 with the login form again when the
        // credentials are rejected.
        let body = response.text().await?;
        if body.contains(LOGIN_FORM_ID) {
            return Err(AuthError::BadCredentials);
        }

        Ok(())
    }
}

impl HistorySource for PortalSession {
    async fn fetch_history(&self) -> Result<Html, FetchError> {
        debug!("fetching bill history from {}", self.history_url);

        let response = self
            .client
            .get(&self.history_url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: self.history_url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: self.history_url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| FetchError::Transport {
                url: self.history_url.clone(),
                source,
            })?;

        Ok(Html::parse_document(&body))
    }
}
