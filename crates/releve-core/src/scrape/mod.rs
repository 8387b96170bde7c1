//! Bill scraping pipeline: fetch the history page, extract billing blocks,
//! reconcile them into records.

mod extractor;
mod reconciler;
pub mod rules;

pub use extractor::{extract, Fragment, SubBill};
pub use reconciler::reconcile;

use scraper::Html;
use tracing::{debug, info};

use crate::error::FetchError;
use crate::models::bill::BillRecord;
use crate::models::config::ConnectorConfig;
use crate::session::PortalSession;

/// Source of the authenticated bill-history page.
///
/// The pipeline only ever asks for one page; tests substitute a stub to
/// keep the network out.
#[allow(async_fn_in_trait)]
pub trait HistorySource {
    async fn fetch_history(&self) -> Result<Html, FetchError>;
}

/// Fetch and flatten the complete bill history.
///
/// An unreachable history page means the account has no bills yet: the
/// pipeline returns an empty list instead of an error.
pub async fn fetch_bills<S: HistorySource>(
    source: &S,
    config: &ConnectorConfig,
) -> Vec<BillRecord> {
    let document = match source.fetch_history().await {
        Ok(document) => document,
        Err(err) => {
            debug!("history page unavailable: {err}");
            debug!("no bills found for this account");
            return Vec::new();
        }
    };

    reconcile(&extract(&document), config)
}

/// The complete connector: authenticated portal session plus scrape
/// pipeline.
pub struct Connector {
    session: PortalSession,
    config: ConnectorConfig,
}

impl Connector {
    pub fn new(config: ConnectorConfig) -> crate::Result<Self> {
        let session = PortalSession::new(&config)?;
        Ok(Self { session, config })
    }

    /// Authenticate and fetch every available bill record.
    ///
    /// Authentication failures are fatal; a missing or empty bill history
    /// is not.
    pub async fn run(&self, username: &str, password: &str) -> crate::Result<Vec<BillRecord>> {
        self.session.login(username, password).await?;
        info!("authenticated against the portal");

        let records = fetch_bills(&self.session, &self.config).await;
        info!("reconciled {} bill records", records.len());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct StubSource(Option<&'static str>);

    impl HistorySource for StubSource {
        async fn fetch_history(&self) -> Result<Html, FetchError> {
            match self.0 {
                Some(html) => Ok(Html::parse_document(html)),
                None => Err(FetchError::Status {
                    url: "https://www.totalenergies.fr/clients".to_string(),
                    status: 500,
                }),
            }
        }
    }

    const HISTORY_PAGE: &str = r#"<html><body>
        <div class="detail-facture">
          <div class="detail-facture__label"><strong>Facture d'électricité</strong></div>
          <p class="text--body">N° ABC123</p>
          <div class="detail-facture__date">01/03/2024</div>
          <div class="detail-facture__statut">Payée</div>
          <div class="detail-facture__montant">45,67 €</div>
          <div class="detail-facture__action">
            <a class="btn--telecharger" href="/facture/abc123.pdf">Télécharger</a>
          </div>
        </div>
        <div class="detail-facture">
          <div class="detail-facture__label"><strong>Facture d'électricité</strong></div>
          <p class="text--body">N° DEF456</p>
          <div class="detail-facture__date">01/04/2024</div>
          <div class="detail-facture__statut">Remboursée le 05/04</div>
          <div class="detail-facture__montant">12,00 €</div>
          <div class="detail-facture__action">
            <a class="btn--telecharger" href="/facture/def456.pdf">Télécharger</a>
          </div>
        </div>
        <div class="detail-facture">
          <div class="detail-facture__label"><strong>Échéancier</strong></div>
          <p class="text--body">N° ECH42</p>
          <div class="detail-facture__date">01/01/2024</div>
          <div class="detail-facture__statut">En cours</div>
          <div class="detail-facture__montant">2/4</div>
          <div class="detail-facture__action btn-bas-nivo2">Voir l'échéancier</div>
        </div>
        <div class="action__display-zone">
          <a class="btn--telecharger" href="/facture/ech42.pdf">Télécharger</a>
          <table><tbody>
            <tr><td>1/4</td><td>10,00 €</td><td>Mensualité</td><td>Payée le 15/01/2024</td></tr>
            <tr><td>2/4</td><td>10,00 €</td><td>Mensualité</td><td>À venir</td></tr>
          </tbody></table>
        </div>
    </body></html>"#;

    #[tokio::test]
    async fn test_fetch_failure_yields_no_bills() {
        let records = fetch_bills(&StubSource(None), &ConnectorConfig::default()).await;
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_full_history_page() {
        let records = fetch_bills(&StubSource(Some(HISTORY_PAGE)), &ConnectorConfig::default()).await;

        assert_eq!(records.len(), 3);

        assert_eq!(records[0].vendor_ref, "ABC123");
        assert_eq!(records[0].is_refund, Some(false));
        assert!(records[0].filename.ends_with("45.67EURABC123.pdf"));

        assert_eq!(records[1].vendor_ref, "DEF456");
        assert_eq!(records[1].is_refund, Some(true));

        assert_eq!(records[2].vendor_ref, "ECH42");
        assert_eq!(records[2].filename, "echeancier_20240101_TotalEnergies.pdf");
        assert_eq!(
            records[2].file_url,
            "https://www.totalenergies.fr/facture/ech42.pdf"
        );
    }
}
