//! Locale normalizers and field patterns for portal billing cells.

pub mod amounts;
pub mod dates;
pub mod patterns;

pub use amounts::{format_amount, normalize_amount, Amount};
pub use dates::{format_compact, format_iso, normalize_date};
pub use patterns::*;
