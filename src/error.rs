use serde::{Deserialize, Serialize};
use std::fmt;

/// What went wrong with a field value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Wrong length or shape (ID digit count, date that is not a group).
    Format,
    /// Non-numeric text where a number was expected.
    Parse,
    /// Numeric but outside the allowed bounds.
    Range,
    /// Not one of the known values, or not matching the expected pattern.
    Unrecognized,
    /// A value another field depends on is absent.
    MissingField,
}

/// A structured message produced while normalizing one field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub path: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, path: impl Into<String>, message: impl Into<String>) -> Self {
        Diagnostic {
            kind,
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Error kind for response parsing failures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseErrorKind {
    NoJsonObject,
    Syntax,
    TypeMismatch,
}

/// Produced by `parse_response` when model output cannot become a field tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(path) = &self.path {
            write!(f, "{}: {}", path, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for ParseError {}

/// Rejection reasons for values collected through the intake conversation.
///
/// `Display` yields the exact message shown to the user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntakeError {
    Required { label: String },
    NotNineDigits { label: String },
    CheckDigit,
    AgeNotNumber,
    AgeOutOfRange,
    NotOneOf { label: String, options: Vec<String> },
    Empty { label: String },
    TooLong { label: String, max: usize },
    InvalidCharacters { label: String },
}

impl fmt::Display for IntakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntakeError::Required { label } => write!(f, "{} is required", label),
            IntakeError::NotNineDigits { label } => {
                write!(f, "{} must be exactly 9 digits", label)
            }
            IntakeError::CheckDigit => {
                write!(f, "Invalid ID number (check digit validation failed)")
            }
            IntakeError::AgeNotNumber => write!(f, "Age must be a number"),
            IntakeError::AgeOutOfRange => write!(f, "Age must be between 0 and 120"),
            IntakeError::NotOneOf { label, options } => {
                write!(f, "{} must be one of: {}", label, options.join(", "))
            }
            IntakeError::Empty { label } => write!(f, "{} cannot be empty", label),
            IntakeError::TooLong { label, max } => {
                write!(f, "{} is too long (maximum {} characters)", label, max)
            }
            IntakeError::InvalidCharacters { label } => {
                write!(f, "{} contains invalid characters", label)
            }
        }
    }
}

impl std::error::Error for IntakeError {}

/// Serialization error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SerializeError {
    pub message: String,
}

impl fmt::Display for SerializeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SerializeError {}

/// Combined error type for the `load` entry point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormError {
    Parse(ParseError),
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for FormError {}

impl From<ParseError> for FormError {
    fn from(e: ParseError) -> Self {
        FormError::Parse(e)
    }
}
