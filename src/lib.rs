//! Normalization, validation and confidence scoring for fields extracted from
//! scanned National Insurance accident forms and from intake conversations.
//!
//! Upstream OCR and language models produce noisy, bilingual field guesses.
//! This crate turns them into a corrected field tree, a diagnostic per
//! invalid field, and an overall confidence score:
//!
//! ```text
//! model reply → parse_response → FieldTree ─(Hebrew keys)→ translate_to_english
//!                                     → FormValidator::validate → ValidationReport
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use formcheck::{FieldTree, FormValidator};
//!
//! let mut fields = FieldTree::new();
//! fields.insert("idNumber", "12-345-678-9");
//! fields.insert("mobilePhone", "052-123-4567");
//! fields.insert("timeOfInjury", "9:05");
//!
//! let report = FormValidator::with_reference_year(2026).validate(&fields);
//! assert_eq!(report.normalized.get_text("idNumber"), Some("123456789"));
//! assert_eq!(report.normalized.get_text("timeOfInjury"), Some("09:05"));
//! assert_eq!(report.summary.confidence_text(), "1.00");
//! ```

pub mod checksum;
pub mod enums;
pub mod error;
pub mod intake;
pub mod normalize;
pub mod parse;
pub mod schema;
pub mod serialize;
pub mod types;
pub mod validate;

pub use error::*;
pub use types::*;

// Re-export entry-point functions at the crate root for convenience.
pub use enums::{ConfidenceBand, Language};
pub use parse::parse_response;
pub use schema::translate_to_english;
pub use serialize::serialize;
pub use validate::{FormValidator, validate};

/// Convenience entry point composing parse → translate → validate, with
/// date ranges ending at the current year.
///
/// Hebrew replies have their keys translated, and missing form fields added
/// as empty values, before validation. Use [`FormValidator::load`] to pin the
/// reference year.
///
/// # Errors
///
/// Returns [`FormError::Parse`] when the reply holds no usable JSON object.
/// Problems with individual field values never fail the call; they are
/// reported in the returned diagnostics.
///
/// # Example
///
/// ```rust
/// use formcheck::Language;
///
/// let reply = r#"Extracted: {"idNumber": "123456789", "gender": "ז"}"#;
/// let report = formcheck::load(reply, Language::English).expect("reply contains JSON");
/// assert_eq!(report.normalized.get_text("gender"), Some("Male"));
/// ```
pub fn load(reply: &str, language: Language) -> Result<ValidationReport, FormError> {
    FormValidator::new().load(reply, language)
}
