use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("Invalid value '{value}' for filter '{key}': {reason}")]
    InvalidFilter {
        key: &'static str,
        value: String,
        reason: String,
    },
}
