//! Validation of personal details collected through the intake conversation.
//!
//! Unlike the form path, values here are typed by a person, so the national
//! ID gets the full check-digit test.

use crate::checksum;
use crate::enums::{Hmo, InsuranceTier, Language, ReportedGender};
use crate::error::IntakeError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

pub const MAX_NAME_LEN: usize = 50;
pub const MAX_AGE: i64 = 120;

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\x{0590}-\x{05FF}a-zA-Z\s\-']+$").unwrap());

fn required<'a>(value: &'a str, label: &str) -> Result<&'a str, IntakeError> {
    if value.is_empty() {
        return Err(IntakeError::Required {
            label: label.to_string(),
        });
    }
    Ok(value.trim())
}

fn nine_digits<'a>(value: &'a str, label: &str) -> Result<&'a str, IntakeError> {
    let value = required(value, label)?;
    if checksum::digits(value).is_none() {
        return Err(IntakeError::NotNineDigits {
            label: label.to_string(),
        });
    }
    Ok(value)
}

/// Nine digits with a valid check digit. Returns the trimmed ID.
pub fn validate_id_number(id: &str) -> Result<String, IntakeError> {
    let id = nine_digits(id, "ID number")?;
    if !checksum::is_valid_id(id) {
        return Err(IntakeError::CheckDigit);
    }
    Ok(id.to_string())
}

/// Nine digits, no checksum.
pub fn validate_hmo_card_number(card: &str) -> Result<String, IntakeError> {
    nine_digits(card, "HMO card number").map(str::to_string)
}

pub fn validate_age(age: &str) -> Result<i64, IntakeError> {
    let n: i64 = age.trim().parse().map_err(|_| IntakeError::AgeNotNumber)?;
    if !(0..=MAX_AGE).contains(&n) {
        return Err(IntakeError::AgeOutOfRange);
    }
    Ok(n)
}

pub fn validate_hmo(hmo: &str) -> Result<Hmo, IntakeError> {
    if hmo.is_empty() {
        return Err(IntakeError::Required {
            label: "HMO name".to_string(),
        });
    }
    Hmo::from_name(hmo).ok_or_else(|| IntakeError::NotOneOf {
        label: "HMO".to_string(),
        options: Hmo::ALL.iter().map(|h| h.as_str().to_string()).collect(),
    })
}

pub fn validate_insurance_tier(tier: &str) -> Result<InsuranceTier, IntakeError> {
    if tier.is_empty() {
        return Err(IntakeError::Required {
            label: "Insurance tier".to_string(),
        });
    }
    InsuranceTier::from_name(tier).ok_or_else(|| IntakeError::NotOneOf {
        label: "Insurance tier".to_string(),
        options: InsuranceTier::ALL
            .iter()
            .map(|t| t.as_str().to_string())
            .collect(),
    })
}

/// Hebrew or Latin letters, whitespace, hyphens and apostrophes; at most 50
/// characters after trimming. `label` names the field in messages.
pub fn validate_name(name: &str, label: &str) -> Result<String, IntakeError> {
    let name = required(name, label)?;
    if name.is_empty() {
        return Err(IntakeError::Empty {
            label: label.to_string(),
        });
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(IntakeError::TooLong {
            label: label.to_string(),
            max: MAX_NAME_LEN,
        });
    }
    if !NAME_RE.is_match(name) {
        return Err(IntakeError::InvalidCharacters {
            label: label.to_string(),
        });
    }
    Ok(name.to_string())
}

/// Personal details gathered by the intake conversation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInformation {
    pub first_name: String,
    pub last_name: String,
    pub id_number: String,
    pub gender: ReportedGender,
    pub age: i64,
    pub hmo: Hmo,
    pub hmo_card_number: String,
    pub insurance_tier: InsuranceTier,
    #[serde(default)]
    pub language: Language,
}

/// A rejected intake field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub error: IntakeError,
}

impl UserInformation {
    /// Every failing field, in form order. Empty when all details are valid.
    pub fn validate(&self) -> Vec<FieldError> {
        let checks: [(&'static str, Result<(), IntakeError>); 5] = [
            ("first_name", validate_name(&self.first_name, "First name").map(drop)),
            ("last_name", validate_name(&self.last_name, "Last name").map(drop)),
            ("id_number", validate_id_number(&self.id_number).map(drop)),
            ("age", validate_age(&self.age.to_string()).map(drop)),
            (
                "hmo_card_number",
                validate_hmo_card_number(&self.hmo_card_number).map(drop),
            ),
        ];
        let errors: Vec<FieldError> = checks
            .into_iter()
            .filter_map(|(field, result)| result.err().map(|error| FieldError { field, error }))
            .collect();
        if !errors.is_empty() {
            tracing::debug!(count = errors.len(), "intake details rejected");
        }
        errors
    }
}
