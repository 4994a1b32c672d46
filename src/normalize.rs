//! Per-field-type correction rules.
//!
//! Each normalizer looks at one value, records at most one diagnostic per
//! path into the supplied [`Diagnostics`], and returns the corrected value
//! when it has one. Callers only pass non-empty values.

use crate::enums::{DateField, Gender};
use crate::error::{Diagnostic, DiagnosticKind};
use crate::schema::{DAY, MONTH, YEAR};
use crate::types::{Diagnostics, FieldTree, FieldValue, join_path};
use regex::Regex;
use std::sync::LazyLock;

/// Two-digit years up to this value belong to the 2000s, the rest to the 1900s.
pub const TWO_DIGIT_YEAR_PIVOT: i64 = 30;
/// Earliest plausible birth year.
pub const MIN_BIRTH_YEAR: i64 = 1900;
/// Earliest year for injury, filling and receipt dates.
pub const MIN_EVENT_YEAR: i64 = 2000;
pub const PHONE_MIN_LEN: usize = 9;
pub const PHONE_MAX_LEN: usize = 15;

static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]{1,2})[:.h]([0-9]{2})").unwrap());

// ─── National ID (format only) ──────────────────────────────────────────────

/// Strips formatting from an ID. Returns the nine digits, or records
/// `ID must be 9 digits` and returns `None` so the original text stays.
///
/// No checksum here: OCR output is checked for shape only. The intake
/// conversation uses [`crate::intake::validate_id_number`], which does.
pub fn national_id(path: &str, value: &str, diags: &mut Diagnostics) -> Option<String> {
    let clean: String = value.chars().filter(char::is_ascii_digit).collect();
    let n = clean.chars().count();
    if n != crate::checksum::ID_LENGTH {
        diags.push(Diagnostic::new(
            DiagnosticKind::Format,
            path,
            format!("ID must be 9 digits, got {}", n),
        ));
        return None;
    }
    Some(clean)
}

// ─── Phone ──────────────────────────────────────────────────────────────────

/// Keeps digits and `+`. Always returns the stripped value, even when its
/// length is outside 9..=15 and a diagnostic is recorded.
pub fn phone(path: &str, value: &str, diags: &mut Diagnostics) -> String {
    let clean: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    let n = clean.chars().count();
    if !(PHONE_MIN_LEN..=PHONE_MAX_LEN).contains(&n) {
        diags.push(Diagnostic::new(
            DiagnosticKind::Format,
            path,
            format!("Phone length is unusual: {}", n),
        ));
    }
    clean
}

// ─── Gender ─────────────────────────────────────────────────────────────────

pub fn gender(path: &str, value: &str, diags: &mut Diagnostics) -> Option<String> {
    let folded = value.to_lowercase();
    match Gender::from_folded(&folded) {
        Some(g) => Some(g.as_str().to_string()),
        None => {
            diags.push(Diagnostic::new(
                DiagnosticKind::Unrecognized,
                path,
                format!("Unknown gender: {}", folded),
            ));
            None
        }
    }
}

// ─── Time of day ────────────────────────────────────────────────────────────

/// Finds the first `H:MM` / `H.MM` / `HhMM` in free text and returns it as `HH:MM`.
pub fn time_of_day(path: &str, value: &str, diags: &mut Diagnostics) -> Option<String> {
    let Some(caps) = TIME_RE.captures(value) else {
        diags.push(Diagnostic::new(
            DiagnosticKind::Unrecognized,
            path,
            format!("Unrecognized time format: {}", value),
        ));
        return None;
    };
    // at most two ASCII digits each
    let h: u32 = caps[1].parse().ok()?;
    let m: u32 = caps[2].parse().ok()?;
    if h > 23 || m > 59 {
        diags.push(Diagnostic::new(
            DiagnosticKind::Range,
            path,
            format!("Time out of range: {}:{}", h, m),
        ));
        return None;
    }
    Some(format!("{:02}:{:02}", h, m))
}

// ─── Date triple ────────────────────────────────────────────────────────────

/// Maps a one- or two-digit year onto a century; four-digit years pass through.
pub fn expand_two_digit_year(year: i64) -> i64 {
    if year >= 100 {
        year
    } else if year <= TWO_DIGIT_YEAR_PIVOT {
        year + 2000
    } else {
        year + 1900
    }
}

/// An integer read from a date component.
///
/// Digit strings too long for `i64` still count as numbers: `value` saturates
/// and `text` keeps the digits, without leading zeros, for messages and
/// write-back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DateNumber {
    pub value: i64,
    pub text: String,
}

impl DateNumber {
    /// Reads an optionally signed run of ASCII digits, ignoring surrounding
    /// whitespace. Anything else is `None`.
    pub fn parse(raw: &str) -> Option<DateNumber> {
        let s = raw.trim();
        if let Ok(value) = s.parse::<i64>() {
            return Some(DateNumber {
                value,
                text: value.to_string(),
            });
        }
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        // only reached on overflow, so at least one non-zero digit remains
        let digits = digits.trim_start_matches('0');
        Some(if negative {
            DateNumber {
                value: i64::MIN,
                text: format!("-{}", digits),
            }
        } else {
            DateNumber {
                value: i64::MAX,
                text: digits.to_string(),
            }
        })
    }

    /// Zero-padded to two characters.
    fn padded(&self) -> String {
        format!("{:0>2}", self.text)
    }

    fn overflowed(&self) -> bool {
        self.text != self.value.to_string()
    }
}

fn unit_label(unit: &str) -> String {
    let mut chars = unit.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Normalizes a `{day, month, year}` group.
///
/// Day and month are zero-padded whenever they parse, in range or not.
/// The year is century-expanded and written back whenever it parses.
/// Components that fail to parse keep their original text.
pub fn date_triple(
    path: &str,
    group: &FieldTree,
    field: DateField,
    current_year: i64,
    diags: &mut Diagnostics,
) -> FieldTree {
    let mut out = group.clone();

    for (unit, min, max) in [(DAY, 1, 31), (MONTH, 1, 12)] {
        let Some(raw) = group.get_text(unit).filter(|s| !s.is_empty()) else {
            continue;
        };
        let unit_path = join_path(path, unit);
        match DateNumber::parse(raw) {
            Some(n) => {
                if !(min..=max).contains(&n.value) {
                    diags.push(Diagnostic::new(
                        DiagnosticKind::Range,
                        unit_path,
                        format!("{} out of range: {}", unit_label(unit), raw),
                    ));
                }
                out.insert(unit, n.padded());
            }
            None => {
                diags.push(Diagnostic::new(
                    DiagnosticKind::Parse,
                    unit_path,
                    format!("Invalid {}: {}", unit, raw),
                ));
            }
        }
    }

    if let Some(raw) = group.get_text(YEAR).filter(|s| !s.is_empty()) {
        let year_path = join_path(path, YEAR);
        match DateNumber::parse(raw) {
            Some(n) => {
                let (y, text) = if n.overflowed() {
                    (n.value, n.text)
                } else {
                    let y = expand_two_digit_year(n.value);
                    (y, y.to_string())
                };
                if !(field.min_year()..=current_year).contains(&y) {
                    diags.push(Diagnostic::new(
                        DiagnosticKind::Range,
                        year_path,
                        field.year_range_message(&text),
                    ));
                }
                out.insert(YEAR, FieldValue::Text(text));
            }
            None => {
                diags.push(Diagnostic::new(
                    DiagnosticKind::Parse,
                    year_path,
                    format!("Invalid year: {}", raw),
                ));
            }
        }
    }

    out
}
