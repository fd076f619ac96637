use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{AnalysisConfig, CollectionConfig, Config, DefaultFilter, ExportConfig};

/// Loads the application configuration.
///
/// Built-in defaults are layered under the optional TOML file at `path` and
/// then under `SRP__`-prefixed environment variables
/// (e.g. `SRP__ANALYSIS__TOP_ISSUERS=20`). A missing file is not an error.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix("SRP").separator("__"))
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(path = %path.display(), "Configuration loaded.");
    Ok(config)
}

impl Config {
    /// Rejects settings the rest of the pipeline cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let analysis = &self.analysis;
        if analysis.top_issuers == 0
            || analysis.top_issuers_per_country == 0
            || analysis.top_issuers_per_risk_level == 0
        {
            return Err(ConfigError::ValidationError(
                "issuer ranking limits must be greater than 0".to_string(),
            ));
        }

        if let Some(end) = self.collection.end_date {
            if end < self.collection.start_date {
                return Err(ConfigError::ValidationError(format!(
                    "collection end_date {} is before start_date {}",
                    end, self.collection.start_date
                )));
            }
        }

        if self.export.json_filename.is_empty()
            || self.export.analysis_filename.is_empty()
            || self.export.report_filename.is_empty()
        {
            return Err(ConfigError::ValidationError(
                "export file names must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::{Currency, RiskLevel};
    use rust_decimal_macros::dec;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.analysis.top_issuers, 10);
        assert_eq!(config.analysis.top_issuers_per_country, 5);
        assert_eq!(config.analysis.top_issuers_per_risk_level, 3);
        assert_eq!(config.export.report_path(), std::path::PathBuf::from("output/srp_report.html"));
    }

    #[test]
    fn file_values_override_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[collection]
start_date = "2024-09-01"
end_date = "2024-12-31"

[analysis]
top_issuers = 3

[analysis.default_filter]
min_nominal_value = 5000
max_risk_level = "4"
currencies = ["CHF"]

[export]
output_dir = "out"
"#
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.collection.start_date, NaiveDate::from_ymd_opt(2024, 9, 1).unwrap());
        assert_eq!(config.collection.effective_end_date(), NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
        assert_eq!(config.analysis.top_issuers, 3);
        assert_eq!(config.analysis.top_issuers_per_country, 5);
        assert_eq!(config.analysis.default_filter.min_nominal_value, dec!(5000));
        assert_eq!(config.analysis.default_filter.max_risk_level, RiskLevel::High);
        assert_eq!(config.analysis.default_filter.currencies, vec![Currency::Chf]);
        assert_eq!(config.export.analysis_path(), std::path::PathBuf::from("out/srp_analysis.json"));
    }

    #[test]
    fn validate_rejects_inverted_window_and_zero_limits() {
        let mut config = Config::default();
        config.collection.end_date = NaiveDate::from_ymd_opt(2024, 1, 1);
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));

        let mut config = Config::default();
        config.analysis.top_issuers = 0;
        assert!(config.validate().is_err());
    }
}
