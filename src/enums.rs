//! Closed enumerations used throughout the form and intake types.
//!
//! Only the defined variants are valid. Free-form field values (names,
//! addresses, descriptions) stay as strings and are never enumerated.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Language a document or conversation is written in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "he")]
    Hebrew,
}

/// Canonical gender written into a normalized form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Recognizes the English and Hebrew spellings a form may carry.
    /// The input must already be lowercased.
    pub fn from_folded(value: &str) -> Option<Gender> {
        match value {
            "m" | "male" | "זכר" | "ז" => Some(Gender::Male),
            "f" | "female" | "נקבה" | "נ" => Some(Gender::Female),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four date groups on the accident form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DateField {
    DateOfBirth,
    DateOfInjury,
    FormFillingDate,
    FormReceiptDateAtClinic,
}

impl DateField {
    /// Earliest year accepted for this date.
    pub fn min_year(&self) -> i64 {
        match self {
            DateField::DateOfBirth => crate::normalize::MIN_BIRTH_YEAR,
            _ => crate::normalize::MIN_EVENT_YEAR,
        }
    }

    /// Message used when the year falls outside `[min_year, current year]`.
    pub fn year_range_message(&self, year: impl std::fmt::Display) -> String {
        match self {
            DateField::DateOfBirth => format!("Unrealistic birth year: {}", year),
            _ => format!("Year not in valid range: {}", year),
        }
    }
}

/// Three-tier severity band derived from an overall confidence score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceBand {
    Low,
    Medium,
    High,
}

impl ConfidenceBand {
    pub const HIGH_THRESHOLD: f64 = 0.7;
    pub const MEDIUM_THRESHOLD: f64 = 0.4;

    pub fn from_score(score: f64) -> ConfidenceBand {
        if score >= Self::HIGH_THRESHOLD {
            ConfidenceBand::High
        } else if score >= Self::MEDIUM_THRESHOLD {
            ConfidenceBand::Medium
        } else {
            ConfidenceBand::Low
        }
    }
}

/// Health maintenance organizations accepted by the intake conversation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hmo {
    #[serde(rename = "מכבי")]
    Maccabi,
    #[serde(rename = "מאוחדת")]
    Meuhedet,
    #[serde(rename = "כללית")]
    Clalit,
}

impl Hmo {
    pub const ALL: [Hmo; 3] = [Hmo::Maccabi, Hmo::Meuhedet, Hmo::Clalit];

    pub fn as_str(&self) -> &'static str {
        match self {
            Hmo::Maccabi => "מכבי",
            Hmo::Meuhedet => "מאוחדת",
            Hmo::Clalit => "כללית",
        }
    }

    pub fn from_name(name: &str) -> Option<Hmo> {
        Self::ALL.into_iter().find(|h| h.as_str() == name)
    }
}

/// Supplementary insurance tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsuranceTier {
    #[serde(rename = "זהב")]
    Gold,
    #[serde(rename = "כסף")]
    Silver,
    #[serde(rename = "ארד")]
    Bronze,
}

impl InsuranceTier {
    pub const ALL: [InsuranceTier; 3] = [
        InsuranceTier::Gold,
        InsuranceTier::Silver,
        InsuranceTier::Bronze,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InsuranceTier::Gold => "זהב",
            InsuranceTier::Silver => "כסף",
            InsuranceTier::Bronze => "ארד",
        }
    }

    pub fn from_name(name: &str) -> Option<InsuranceTier> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

/// Gender as self-reported during the intake conversation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportedGender {
    Male,
    Female,
    Other,
}
