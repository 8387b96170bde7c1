//! Bill record models handed to the save-bills collaborator.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Vendor identifier carried on every record, part of the dedup key.
pub const VENDOR: &str = "Total Energie";

/// Vendor label embedded in generated filenames.
pub const VENDOR_FILENAME: &str = "TotalEnergies";

/// One bill ready for download and storage.
///
/// Fields serialize to the wire names the save-bills collaborator expects
/// (`vendorRef`, `fileurl`, `fileIdAttributes`, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillRecord {
    /// Vendor constant, always [`VENDOR`].
    pub vendor: String,

    /// Vendor-assigned invoice reference.
    pub vendor_ref: String,

    /// Free-text description from the billing block.
    pub label: String,

    /// Billed amount in euros.
    pub amount: Decimal,

    /// Invoice date, or the paid date for installment sub-bills.
    pub date: NaiveDate,

    /// Whether the invoice is a refund; only set on simple invoices.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_refund: Option<bool>,

    /// Fully-qualified download URL.
    #[serde(rename = "fileurl")]
    pub file_url: String,

    /// Deterministic, human-readable filename for the stored PDF.
    pub filename: String,

    /// Names of the fields that make this record unique for deduplication.
    pub file_id_attributes: Vec<String>,

    /// Metadata attached to the downloaded file.
    pub file_attributes: FileAttributes,
}

/// Attributes stored alongside the downloaded file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileAttributes {
    pub metadata: FileMetadata,
}

/// File-level metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    /// Marks the stored file as an authoritative copy of the original.
    pub carbon_copy: bool,
}

impl FileAttributes {
    /// Attributes for an official portal document.
    pub fn carbon_copy() -> Self {
        Self {
            metadata: FileMetadata { carbon_copy: true },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record() -> BillRecord {
        BillRecord {
            vendor: VENDOR.to_string(),
            vendor_ref: "ABC123".to_string(),
            label: "Facture d'électricité".to_string(),
            amount: Decimal::new(4567, 2),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            is_refund: None,
            file_url: "https://www.totalenergies.fr/facture/abc123.pdf".to_string(),
            filename: "2024-03-01_TotalEnergies_45.67EURABC123.pdf".to_string(),
            file_id_attributes: vec!["vendorRef".to_string()],
            file_attributes: FileAttributes::carbon_copy(),
        }
    }

    #[test]
    fn test_wire_names() {
        let json = serde_json::to_value(record()).unwrap();

        assert_eq!(json["vendorRef"], "ABC123");
        assert_eq!(json["fileurl"], "https://www.totalenergies.fr/facture/abc123.pdf");
        assert_eq!(json["fileIdAttributes"][0], "vendorRef");
        assert_eq!(json["fileAttributes"]["metadata"]["carbonCopy"], true);
    }

    #[test]
    fn test_is_refund_skipped_when_unset() {
        let json = serde_json::to_value(record()).unwrap();
        assert!(json.get("isRefund").is_none());

        let mut refund = record();
        refund.is_refund = Some(true);
        let json = serde_json::to_value(refund).unwrap();
        assert_eq!(json["isRefund"], true);
    }
}
