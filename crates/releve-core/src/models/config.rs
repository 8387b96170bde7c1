//! Configuration for the portal connector.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Connector configuration: portal endpoints and HTTP behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectorConfig {
    /// Portal origin, prefixed to every relative download link.
    pub base_url: String,

    /// Login form path, relative to `base_url`.
    pub login_path: String,

    /// Bill-history page path, relative to `base_url`.
    pub history_path: String,

    /// HTTP timeout in seconds for portal requests.
    pub timeout_secs: u64,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.totalenergies.fr".to_string(),
            login_path: "/clients/connexion".to_string(),
            history_path:
                "/clients/mes-factures/mes-factures-electricite/mon-historique-de-factures"
                    .to_string(),
            timeout_secs: 30,
        }
    }
}

impl ConnectorConfig {
    /// Full URL of the login form.
    pub fn login_url(&self) -> String {
        format!("{}{}", self.base_url, self.login_path)
    }

    /// Full URL of the bill-history page.
    pub fn history_url(&self) -> String {
        format!("{}{}", self.base_url, self.history_path)
    }

    /// Qualify a relative download link with the portal origin.
    pub fn qualify(&self, link: &str) -> String {
        if link.starts_with("http") {
            link.to_string()
        } else {
            format!("{}{}", self.base_url, link)
        }
    }

    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_urls() {
        let config = ConnectorConfig::default();
        assert_eq!(config.login_url(), "https://www.totalenergies.fr/clients/connexion");
        assert!(config.history_url().ends_with("/mon-historique-de-factures"));
    }

    #[test]
    fn test_qualify() {
        let config = ConnectorConfig::default();
        assert_eq!(
            config.qualify("/facture/abc123.pdf"),
            "https://www.totalenergies.fr/facture/abc123.pdf"
        );
        assert_eq!(
            config.qualify("https://cdn.example.com/f.pdf"),
            "https://cdn.example.com/f.pdf"
        );
    }
}
