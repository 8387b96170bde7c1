//! Date normalization for portal billing cells.

use chrono::NaiveDate;

/// Parse a portal date cell in `DD/MM/YYYY` form.
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%d/%m/%Y").ok()
}

/// `YYYYMMDD` form used in installment filenames.
pub fn format_compact(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// `YYYY-MM-DD` form used in invoice filenames.
pub fn format_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_date() {
        assert_eq!(normalize_date("01/03/2024"), NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(normalize_date(" 15/01/2024 "), NaiveDate::from_ymd_opt(2024, 1, 15));
    }

    #[test]
    fn test_rejects_other_shapes() {
        assert_eq!(normalize_date("2024-03-01"), None);
        assert_eq!(normalize_date("31/02/2024"), None);
        assert_eq!(normalize_date("À venir"), None);
    }

    #[test]
    fn test_filename_forms() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(format_compact(date), "20240101");
        assert_eq!(format_iso(date), "2024-01-01");
    }
}
