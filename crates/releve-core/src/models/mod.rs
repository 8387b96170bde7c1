//! Data models: output bill records and connector configuration.

pub mod bill;
pub mod config;

pub use bill::{BillRecord, FileAttributes, FileMetadata, VENDOR};
pub use config::ConnectorConfig;
