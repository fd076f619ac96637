use chrono::{Local, NaiveDate};
use core_types::{Country, Currency, RiskLevel};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub collection: CollectionConfig,
    pub analysis: AnalysisConfig,
    pub export: ExportConfig,
}

/// Which products are expected from ingestion sources.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    /// First issue date of the collection window.
    pub start_date: NaiveDate,
    /// Last issue date of the window. `None` means "today".
    pub end_date: Option<NaiveDate>,
    pub countries: Vec<Country>,
}

/// Limits used by the aggregation engine, plus the default product filter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Length of the global issuer ranking.
    pub top_issuers: usize,
    /// Issuers listed inside each country breakdown.
    pub top_issuers_per_country: usize,
    /// Issuers listed inside each risk-level breakdown.
    pub top_issuers_per_risk_level: usize,
    pub default_filter: DefaultFilter,
}

/// Filter thresholds applied when the user asks for the configured defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DefaultFilter {
    pub min_nominal_value: Decimal,
    pub max_risk_level: RiskLevel,
    pub currencies: Vec<Currency>,
}

/// Where and under which names snapshots and reports are written.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    pub json_filename: String,
    pub analysis_filename: String,
    pub report_filename: String,
}

// --- Default Implementations ---
// These mirror the values the collection pipeline has always run with, so an
// empty or missing config file still produces a usable setup.

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            start_date: NaiveDate::from_ymd_opt(2024, 8, 15).unwrap_or_default(),
            end_date: None,
            countries: Country::ALL.to_vec(),
        }
    }
}

impl CollectionConfig {
    /// The configured end date, or today's local date when none is set.
    pub fn effective_end_date(&self) -> NaiveDate {
        self.end_date.unwrap_or_else(|| Local::now().date_naive())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_issuers: 10,
            top_issuers_per_country: 5,
            top_issuers_per_risk_level: 3,
            default_filter: DefaultFilter::default(),
        }
    }
}

impl Default for DefaultFilter {
    fn default() -> Self {
        Self {
            min_nominal_value: dec!(1000),
            max_risk_level: RiskLevel::VeryHigh,
            currencies: vec![Currency::Eur, Currency::Usd, Currency::Gbp],
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            json_filename: "srp_products.json".to_string(),
            analysis_filename: "srp_analysis.json".to_string(),
            report_filename: "srp_report.html".to_string(),
        }
    }
}

impl ExportConfig {
    pub fn products_path(&self) -> PathBuf {
        self.output_dir.join(&self.json_filename)
    }

    pub fn analysis_path(&self) -> PathBuf {
        self.output_dir.join(&self.analysis_filename)
    }

    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(&self.report_filename)
    }
}
