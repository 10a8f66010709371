//! The two text views of a dataset: pretty JSON and JSONL

use crate::record::Record;

/// Two-space indented JSON array. An empty dataset renders as `[]`.
pub fn to_pretty_json(records: &[Record]) -> String {
    serde_json::to_string_pretty(records).unwrap_or_else(|_| "[]".to_string())
}

/// One compact JSON object per record joined by `\n`, without a trailing
/// newline. An empty dataset renders as the empty string.
pub fn to_jsonl(records: &[Record]) -> String {
    records
        .iter()
        .map(|record| serde_json::to_string(record).unwrap_or_else(|_| "{}".to_string()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Number of records a JSONL view holds
pub fn jsonl_line_count(jsonl: &str) -> usize {
    if jsonl.is_empty() {
        0
    } else {
        jsonl.split('\n').count()
    }
}
