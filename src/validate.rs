//! Single-pass validation of an extracted accident form.
//!
//! The walker visits every leaf of the input once, dispatching on the field
//! kind from the schema registry. The input is never modified: the normalized
//! tree is built from a copy. Field problems become diagnostics and never
//! stop processing of sibling fields.

use crate::enums::Language;
use crate::error::{Diagnostic, DiagnosticKind, FormError};
use crate::normalize;
use crate::parse;
use crate::schema::{self, CITY, FieldKind, POSTAL_CODE, field_kind};
use crate::types::*;
use chrono::Datelike;

/// Confidence lost per diagnostic.
pub const DIAGNOSTIC_PENALTY: f64 = 0.05;
/// Cap on the total diagnostic penalty.
pub const MAX_PENALTY: f64 = 0.5;

/// Validates extracted form fields against the accident-form rules.
///
/// Holds only the reference year used for date range checks, so one
/// instance can be shared freely or built per request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormValidator {
    reference_year: i64,
}

impl Default for FormValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl FormValidator {
    /// A validator whose date ranges end at the current local year.
    pub fn new() -> Self {
        Self::with_reference_year(i64::from(chrono::Local::now().year()))
    }

    /// A validator pinned to `year`, for reproducible runs.
    pub fn with_reference_year(year: i64) -> Self {
        FormValidator {
            reference_year: year,
        }
    }

    pub fn reference_year(&self) -> i64 {
        self.reference_year
    }

    /// Normalize `fields`, collect diagnostics, and score the result.
    pub fn validate(&self, fields: &FieldTree) -> ValidationReport {
        let mut diagnostics = Diagnostics::new();
        let normalized = self.walk(fields, "", &mut diagnostics);
        address_postal_code(fields, &mut diagnostics);

        let summary = summarize(fields, diagnostics.len());
        tracing::info!(
            confidence = %summary.confidence_text(),
            filled = summary.filled,
            total = summary.total,
            diagnostics = diagnostics.len(),
            "validation complete"
        );

        ValidationReport {
            normalized,
            diagnostics,
            summary,
        }
    }

    /// Parse a model reply, translate Hebrew keys, and validate.
    pub fn load(&self, reply: &str, language: Language) -> Result<ValidationReport, FormError> {
        let tree = parse::parse_response(reply)?;
        let tree = match language {
            Language::Hebrew => schema::translate_to_english(&tree),
            Language::English => tree,
        };
        Ok(self.validate(&tree))
    }

    fn walk(&self, tree: &FieldTree, prefix: &str, diags: &mut Diagnostics) -> FieldTree {
        let mut out = FieldTree::new();
        for (key, value) in tree {
            let path = join_path(prefix, key);
            // schema kinds apply to top-level keys only
            let kind = if prefix.is_empty() {
                field_kind(key)
            } else {
                FieldKind::Text
            };
            let normalized = match (kind, value) {
                (FieldKind::Date(field), FieldValue::Group(group)) => FieldValue::Group(
                    normalize::date_triple(&path, group, field, self.reference_year, diags),
                ),
                (FieldKind::Date(_), FieldValue::Text(_)) => {
                    diags.push(Diagnostic::new(
                        DiagnosticKind::Format,
                        &path,
                        "Expected a date dictionary",
                    ));
                    value.clone()
                }
                (_, FieldValue::Group(group)) => FieldValue::Group(self.walk(group, &path, diags)),
                (_, FieldValue::Text(text)) if text.is_empty() => value.clone(),
                (kind, FieldValue::Text(text)) => {
                    FieldValue::Text(normalize_leaf(kind, &path, text, diags))
                }
            };
            out.insert(key.as_str(), normalized);
        }
        out
    }
}

fn normalize_leaf(kind: FieldKind, path: &str, text: &str, diags: &mut Diagnostics) -> String {
    let corrected = match kind {
        FieldKind::NationalId => normalize::national_id(path, text, diags),
        FieldKind::Phone => Some(normalize::phone(path, text, diags)),
        FieldKind::Gender => normalize::gender(path, text, diags),
        FieldKind::TimeOfDay => normalize::time_of_day(path, text, diags),
        FieldKind::Text | FieldKind::Address | FieldKind::Group | FieldKind::Date(_) => None,
    };
    corrected.unwrap_or_else(|| text.to_string())
}

/// A city without a postal code is flagged on `address.postalCode`.
fn address_postal_code(fields: &FieldTree, diags: &mut Diagnostics) {
    let Some(address) = fields.get_group("address") else {
        return;
    };
    if address.is_filled(CITY) && !address.is_filled(POSTAL_CODE) {
        diags.push(Diagnostic::new(
            DiagnosticKind::MissingField,
            format!("address.{}", POSTAL_CODE),
            "Postal code is missing",
        ));
    }
}

/// Fill ratio less a per-diagnostic penalty, floored at zero.
pub fn confidence(filled: usize, total: usize, diagnostic_count: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let penalty = (diagnostic_count as f64 * DIAGNOSTIC_PENALTY).min(MAX_PENALTY);
    (filled as f64 / total as f64 - penalty).max(0.0)
}

/// Counts are taken over the input tree, not the normalized one.
fn summarize(fields: &FieldTree, diagnostic_count: usize) -> Summary {
    let total = fields.total_leaves();
    let filled = fields.filled_leaves();
    Summary {
        filled,
        total,
        confidence: confidence(filled, total, diagnostic_count),
    }
}

/// Validate with a validator for the current year.
pub fn validate(fields: &FieldTree) -> ValidationReport {
    FormValidator::new().validate(fields)
}
