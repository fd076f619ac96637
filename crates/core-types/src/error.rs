use rust_decimal::Decimal;
use thiserror::Error;

/// A string did not name any variant of one of the domain enumerations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// A product field was missing, malformed or out of range.
///
/// Every variant carries the name of the offending field so batch callers can
/// report it without inspecting the message.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("field '{field}' is required")]
    Missing { field: &'static str },

    #[error("field '{field}' must not be empty")]
    Empty { field: &'static str },

    #[error("field '{field}': {source}")]
    UnknownVariant {
        field: &'static str,
        source: ParseEnumError,
    },

    #[error("field '{field}' is not a valid date: '{value}'")]
    InvalidDate { field: &'static str, value: String },

    #[error("field '{field}' is not a valid number: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("field '{field}' must be strictly positive, got {value}")]
    NotPositive { field: &'static str, value: Decimal },

    #[error("field '{field}' must not exceed {max}, got {value}")]
    TooLarge {
        field: &'static str,
        value: Decimal,
        max: Decimal,
    },

    #[error("field '{field}' must be between 0 and 100, got {value}")]
    OutOfRange { field: &'static str, value: Decimal },

    #[error("maturity_date {maturity} must be after issue_date {issue}")]
    MaturityNotAfterIssue {
        issue: chrono::NaiveDate,
        maturity: chrono::NaiveDate,
    },
}

impl ValidationError {
    /// Name of the field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Missing { field }
            | ValidationError::Empty { field }
            | ValidationError::UnknownVariant { field, .. }
            | ValidationError::InvalidDate { field, .. }
            | ValidationError::InvalidNumber { field, .. }
            | ValidationError::NotPositive { field, .. }
            | ValidationError::TooLarge { field, .. }
            | ValidationError::OutOfRange { field, .. } => field,
            ValidationError::MaturityNotAfterIssue { .. } => "maturity_date",
        }
    }
}

/// A raw record that was skipped during batch conversion.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("record #{} ({}): {error}", .index + 1, .id.as_deref().unwrap_or("no id"))]
pub struct RecordError {
    /// Zero-based position of the record in the input batch.
    pub index: usize,
    pub id: Option<String>,
    pub error: ValidationError,
}
