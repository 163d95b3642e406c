//! Types for scan history storage.

use serde::{Deserialize, Serialize};

/// Timestamp format of stored records
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// One scan result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: i64,
    /// Decoded barcode text
    pub value: String,
    pub timestamp: String,
    /// Barcode format name, empty for records older than the format column
    pub format: String,
}

/// Result of listing history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryPage {
    pub records: Vec<HistoryRecord>,
    pub total_count: usize,
}

/// Current local time in [`TIMESTAMP_FORMAT`]
pub fn now_timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}
