//! Field patterns for the billing blocks of the history page.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Vendor reference line, e.g. "N° 10012345"
    pub static ref VENDOR_REF: Regex = Regex::new(
        r"^N°\s*(.+)$"
    ).unwrap();

    // Paid installment row status, e.g. "Payée le 15/01/2024"
    pub static ref PAID_ON: Regex = Regex::new(
        r"Payée le\s*(.+)"
    ).unwrap();
}

/// Status substring marking a refunded invoice.
pub const REFUND_MARKER: &str = "Remboursée";
