//! Currency amount normalization for portal billing cells.

use rust_decimal::Decimal;
use std::str::FromStr;

/// A normalized billing-cell amount.
///
/// The portal renders installment progress ratios ("2/4") in the cell that
/// otherwise holds a currency figure; those are not monetary values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Amount {
    /// The cell held a ratio, not a currency figure.
    NotApplicable,
    /// Parsed currency value in euros.
    Value(Decimal),
}

impl Amount {
    /// The monetary value, if the cell held one.
    pub fn value(self) -> Option<Decimal> {
        match self {
            Amount::Value(value) => Some(value),
            Amount::NotApplicable => None,
        }
    }

    pub fn is_not_applicable(self) -> bool {
        matches!(self, Amount::NotApplicable)
    }
}

/// Parse a locale-formatted amount cell (e.g. "1 234,56 €").
///
/// Cells containing a `/` normalize to [`Amount::NotApplicable`]. Returns
/// `None` when the cell holds neither a ratio nor a parseable currency
/// figure; callers treat that as a malformed field.
pub fn normalize_amount(raw: &str) -> Option<Amount> {
    if raw.contains('/') {
        return Some(Amount::NotApplicable);
    }

    let cleaned: String = raw
        .replace('€', "")
        .replace(',', ".")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    Decimal::from_str(&cleaned).ok().map(Amount::Value)
}

/// Format an amount for filenames: two decimals, period separator.
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_currency_cell() {
        assert_eq!(normalize_amount("1,23 €"), Some(Amount::Value(Decimal::new(123, 2))));
        assert_eq!(normalize_amount("45,67 €"), Some(Amount::Value(Decimal::new(4567, 2))));
        assert_eq!(
            normalize_amount("1 234,56 €"),
            Some(Amount::Value(Decimal::from_str("1234.56").unwrap()))
        );
    }

    #[test]
    fn test_non_breaking_spaces() {
        assert_eq!(
            normalize_amount("1\u{00a0}234,56\u{00a0}€"),
            Some(Amount::Value(Decimal::from_str("1234.56").unwrap()))
        );
    }

    #[test]
    fn test_ratio_cell_is_not_applicable() {
        assert_eq!(normalize_amount("2/4"), Some(Amount::NotApplicable));
    }

    #[test]
    fn test_malformed_cell() {
        assert_eq!(normalize_amount("indisponible"), None);
        assert_eq!(normalize_amount(""), None);
    }

    #[test]
    fn test_negative_amount() {
        assert_eq!(normalize_amount("-45,67 €"), Some(Amount::Value(Decimal::new(-4567, 2))));
    }

    #[test]
    fn test_format_round_trip() {
        // "<int>,<2 digits> €" cells survive normalize-then-format.
        for raw in ["0,00 €", "45,67 €", "120,50 €"] {
            let Some(Amount::Value(value)) = normalize_amount(raw) else {
                panic!("{raw} did not normalize to a value");
            };
            let formatted = format_amount(value);
            assert_eq!(
                normalize_amount(&format!("{formatted} €")),
                Some(Amount::Value(value))
            );
        }
    }
}
