use thiserror::Error;

/// Errors raised while assembling the application configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file or environment layer could not be read or deserialized.
    #[error("Failed to load SRP configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    /// The configuration parsed but holds values the pipeline cannot use.
    #[error("Invalid SRP configuration: {0}")]
    ValidationError(String),
}
