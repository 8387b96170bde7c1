//! Flattening of extracted fragments into bill records.

use tracing::warn;

use crate::models::bill::{BillRecord, FileAttributes, VENDOR, VENDOR_FILENAME};
use crate::models::config::ConnectorConfig;

use super::extractor::Fragment;
use super::rules::{format_amount, format_compact, format_iso, Amount, REFUND_MARKER};

// Dedup keys: vendor-assigned references are unique per invoice, while
// installment sub-bills are only told apart by their paid date and amount.
const INVOICE_ID_ATTRIBUTES: &[&str] = &["vendorRef"];
const INSTALLMENT_ID_ATTRIBUTES: &[&str] = &["vendor", "vendorRef", "date", "amount"];

/// Flatten fragments into one record per invoice or paid installment.
///
/// Output order follows document order, sub-bills in their row order. A
/// fragment with a details panel contributes only its rows, never a
/// top-level record of its own.
pub fn reconcile(fragments: &[Fragment], config: &ConnectorConfig) -> Vec<BillRecord> {
    let mut records = Vec::new();

    for fragment in fragments {
        match &fragment.sub_bills {
            Some(sub_bills) => {
                // Every row of a plan shares the plan date in its filename.
                let plan_date = format_compact(fragment.date);
                for sub_bill in sub_bills {
                    records.push(BillRecord {
                        vendor: VENDOR.to_string(),
                        vendor_ref: fragment.vendor_ref.clone(),
                        label: fragment.label.clone(),
                        amount: sub_bill.amount,
                        date: sub_bill.date,
                        is_refund: None,
                        file_url: config.qualify(&sub_bill.file_url),
                        filename: format!("echeancier_{plan_date}_{VENDOR_FILENAME}.pdf"),
                        file_id_attributes: to_owned(INSTALLMENT_ID_ATTRIBUTES),
                        file_attributes: FileAttributes::carbon_copy(),
                    });
                }
            }
            None => {
                let Amount::Value(amount) = fragment.amount else {
                    warn!(
                        "skipping {}: no billable amount outside an installment panel",
                        fragment.vendor_ref
                    );
                    continue;
                };
                let Some(file_url) = &fragment.file_url else {
                    warn!("skipping {}: no download link", fragment.vendor_ref);
                    continue;
                };

                records.push(BillRecord {
                    vendor: VENDOR.to_string(),
                    vendor_ref: fragment.vendor_ref.clone(),
                    label: fragment.label.clone(),
                    amount,
                    date: fragment.date,
                    is_refund: Some(fragment.status.contains(REFUND_MARKER)),
                    file_url: config.qualify(file_url),
                    filename: format!(
                        "{}_{}_{}EUR{}.pdf",
                        format_iso(fragment.date),
                        VENDOR_FILENAME,
                        format_amount(amount),
                        fragment.vendor_ref
                    ),
                    file_id_attributes: to_owned(INVOICE_ID_ATTRIBUTES),
                    file_attributes: FileAttributes::carbon_copy(),
                });
            }
        }
    }

    records
}

fn to_owned(attributes: &[&str]) -> Vec<String> {
    attributes.iter().map(|a| a.to_string()).collect()
}
