//! Billing-block extraction from the bill-history page.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use rust_decimal::Decimal;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::dom;
use crate::error::ExtractionError;

use super::rules::{normalize_amount, normalize_date, Amount, PAID_ON, VENDOR_REF};

lazy_static! {
    // One selector per field of a billing block, scoped to the block.
    static ref BILL_BLOCK: Selector = Selector::parse(".detail-facture").unwrap();
    static ref LABEL: Selector = Selector::parse(".detail-facture__label strong").unwrap();
    static ref VENDOR_REF_CELL: Selector = Selector::parse(".text--body").unwrap();
    static ref DATE_CELL: Selector = Selector::parse(".detail-facture__date").unwrap();
    static ref STATUS_CELL: Selector = Selector::parse(".detail-facture__statut").unwrap();
    static ref AMOUNT_CELL: Selector = Selector::parse(".detail-facture__montant").unwrap();
    static ref ECHEANCIER_ACTION: Selector =
        Selector::parse(".detail-facture__action.btn-bas-nivo2").unwrap();
    static ref DOWNLOAD_LINK: Selector = Selector::parse(".btn--telecharger").unwrap();

    // Installment details panel
    static ref DETAIL_ROWS: Selector = Selector::parse("tbody tr").unwrap();
    static ref ROW_AMOUNT: Selector = Selector::parse("td:nth-child(2)").unwrap();
    static ref ROW_STATUS: Selector = Selector::parse("td:nth-child(4)").unwrap();
}

/// Class marking the details panel that follows an installment-plan block.
const DISPLAY_ZONE: &str = "action__display-zone";

/// One billing block of the history page, before reconciliation.
#[derive(Debug, Clone)]
pub struct Fragment {
    /// Free-text description.
    pub label: String,

    /// Vendor-assigned reference, taken from the "N° <ref>" line.
    pub vendor_ref: String,

    /// Invoice date, or the plan date for installment blocks.
    pub date: NaiveDate,

    /// Free-text status; may carry the refund marker.
    pub status: String,

    /// Amount cell, which can hold an installment ratio instead of money.
    pub amount: Amount,

    /// Whether the block's action area flags an installment plan.
    pub is_echeancier: bool,

    /// Relative download link of the block itself.
    pub file_url: Option<String>,

    /// Rows of the installment details panel; `None` when the block has no
    /// panel.
    pub sub_bills: Option<Vec<SubBill>>,
}

/// One paid installment row of a details panel.
#[derive(Debug, Clone)]
pub struct SubBill {
    /// Amount of the installment payment.
    pub amount: Decimal,

    /// Date the installment was paid.
    pub date: NaiveDate,

    /// Download link shared by every row of the panel.
    pub file_url: String,
}

/// Walk every billing block of the history page.
///
/// Malformed blocks are skipped with a warning rather than aborting the
/// scrape; installment rows without a "Payée le" date are dropped silently,
/// since unpaid rows are a normal occurrence.
pub fn extract(document: &Html) -> Vec<Fragment> {
    let mut fragments = Vec::new();

    for block in document.select(&BILL_BLOCK) {
        match extract_fragment(block) {
            Ok(Some(fragment)) => fragments.push(fragment),
            Ok(None) => {}
            Err(err) => warn!("skipping malformed billing block: {err}"),
        }
    }

    debug!("extracted {} billing blocks", fragments.len());
    fragments
}

fn extract_fragment(block: ElementRef<'_>) -> Result<Option<Fragment>, ExtractionError> {
    let raw_ref = dom::first_text(block, &VENDOR_REF_CELL)
        .ok_or(ExtractionError::MissingField("vendorRef"))?;
    let vendor_ref = VENDOR_REF
        .captures(&raw_ref)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .ok_or_else(|| ExtractionError::Pattern {
            field: "vendorRef",
            value: raw_ref,
        })?;

    let raw_date =
        dom::first_text(block, &DATE_CELL).ok_or(ExtractionError::MissingField("date"))?;
    let date = normalize_date(&raw_date).ok_or_else(|| ExtractionError::Parse {
        field: "date",
        value: raw_date,
    })?;

    let raw_amount =
        dom::first_text(block, &AMOUNT_CELL).ok_or(ExtractionError::MissingField("amount"))?;
    let amount = normalize_amount(&raw_amount).ok_or_else(|| ExtractionError::Parse {
        field: "amount",
        value: raw_amount,
    })?;

    let is_echeancier = dom::first(block, &ECHEANCIER_ACTION).is_some();

    // A ratio cell on a block without the installment action is a pending
    // display row, not a bill.
    if amount.is_not_applicable() && !is_echeancier {
        return Ok(None);
    }

    Ok(Some(Fragment {
        label: dom::first_text(block, &LABEL).unwrap_or_default(),
        status: dom::first_text(block, &STATUS_CELL).unwrap_or_default(),
        file_url: dom::first_attr(block, &DOWNLOAD_LINK, "href"),
        sub_bills: extract_sub_bills(block),
        vendor_ref,
        date,
        amount,
        is_echeancier,
    }))
}

/// Rows of the details panel following `block`, when that panel exists.
///
/// The panel is the next sibling element flagged as a display zone; its
/// download link is shared by every row.
fn extract_sub_bills(block: ElementRef<'_>) -> Option<Vec<SubBill>> {
    let details = dom::next_sibling_element(block)?;
    if !dom::has_class(details, DISPLAY_ZONE) {
        return None;
    }

    let shared_url = dom::first_attr(details, &DOWNLOAD_LINK, "href");
    let rows = details
        .select(&DETAIL_ROWS)
        .filter_map(|row| extract_sub_row(row, shared_url.as_deref()))
        .collect();
    Some(rows)
}

fn extract_sub_row(row: ElementRef<'_>, shared_url: Option<&str>) -> Option<SubBill> {
    let status = dom::first_text(row, &ROW_STATUS)?;
    let paid_on = PAID_ON.captures(&status)?;
    let date = normalize_date(paid_on.get(1)?.as_str())?;

    let amount = match normalize_amount(&dom::first_text(row, &ROW_AMOUNT)?)? {
        Amount::Value(value) => value,
        Amount::NotApplicable => return None,
    };

    Some(SubBill {
        amount,
        date,
        file_url: shared_url?.to_string(),
    })
}
