//! Dataset definitions

use serde::Serialize;

/// Maximum length of a dataset id
pub const MAX_DATASET_ID_LENGTH: usize = 64;

/// A named bus-listing table the dashboard can query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dataset {
    /// Stable identifier used in URLs
    pub id: String,
    /// Table name, optionally schema-qualified (`schema.table`)
    pub table: String,
    /// Human-readable name shown in the selector
    pub label: String,
    /// Whether the table carries a `route_link` column
    pub route_link: bool,
}

/// Validate dataset id: 1-64 chars, alphanumeric + dash/underscore
pub fn is_valid_dataset_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_DATASET_ID_LENGTH
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Check that a configured table name is a plain identifier or `schema.table`
///
/// Table names are interpolated into SQL (quoted), so only
/// `[A-Za-z_][A-Za-z0-9_]*` segments are accepted.
pub fn is_valid_table_name(table: &str) -> bool {
    let parts: Vec<&str> = table.split('.').collect();
    parts.len() <= 2 && parts.iter().all(|part| is_identifier(part))
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
