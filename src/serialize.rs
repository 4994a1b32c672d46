//! [`ValidationReport`] → presentation formats.

use crate::error::SerializeError;
use crate::types::{Diagnostics, FieldTree, ValidationReport};
use serde::Serialize;

/// One line of the field table shown to a reviewer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    pub field: String,
    pub value: String,
    /// Diagnostic for this exact path, or empty.
    pub validation: String,
}

/// Flatten a tree into rows keyed by dotted path.
pub fn display_rows(tree: &FieldTree, diagnostics: &Diagnostics) -> Vec<DisplayRow> {
    tree.leaves()
        .into_iter()
        .map(|(field, value)| DisplayRow {
            validation: diagnostics.message(&field).unwrap_or_default().to_string(),
            value: value.to_string(),
            field,
        })
        .collect()
}

#[derive(Serialize)]
struct LegacyReport<'a> {
    fields: &'a FieldTree,
    messages: std::collections::BTreeMap<String, String>,
}

/// Render a report as pretty JSON: the normalized fields next to the flat
/// message map, summary keys included.
pub fn serialize(report: &ValidationReport) -> Result<String, SerializeError> {
    let legacy = LegacyReport {
        fields: &report.normalized,
        messages: report.message_map(),
    };
    serde_json::to_string_pretty(&legacy).map_err(|e| SerializeError {
        message: format!("failed to serialize report to JSON: {}", e),
    })
}
