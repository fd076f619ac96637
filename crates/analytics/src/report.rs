use chrono::{Datelike, NaiveDate};
use core_types::{Country, Currency, DateRange, ProductType, RiskLevel};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// The complete set of statistics computed from one product collection.
///
/// This struct is the final output of the `AnalyticsEngine` and the input of
/// every report renderer. It is a snapshot: if the source collection grows,
/// compute a new one rather than patching this one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregationResult {
    // I. Overall figures
    pub total_products: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_value: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub average_nominal_value: Decimal, // zero when there are no products

    // II. Categorical breakdowns (only non-empty partitions are present)
    pub by_country: BTreeMap<Country, CountryBreakdown>,
    pub by_currency: BTreeMap<Currency, CurrencyBreakdown>,
    pub by_risk_level: BTreeMap<RiskLevel, RiskLevelBreakdown>,
    pub by_product_type: BTreeMap<ProductType, ProductTypeBreakdown>,

    // III. Rankings and time series
    pub top_issuers: Vec<IssuerStats>,
    pub monthly_evolution: BTreeMap<MonthKey, MonthlyStats>,
}

impl AggregationResult {
    /// Creates a new, zeroed-out result.
    /// This is also what analyzing an empty collection returns.
    pub fn new() -> Self {
        Self {
            total_products: 0,
            total_value: Decimal::ZERO,
            average_nominal_value: Decimal::ZERO,
            by_country: BTreeMap::new(),
            by_currency: BTreeMap::new(),
            by_risk_level: BTreeMap::new(),
            by_product_type: BTreeMap::new(),
            top_issuers: Vec::new(),
            monthly_evolution: BTreeMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_products == 0
    }
}

impl Default for AggregationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Figures shared by every categorical partition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartitionStats {
    pub count: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_value: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub average_value: Decimal,
    pub risk_distribution: BTreeMap<RiskLevel, usize>,
}

/// Issuer occurrence count inside a single partition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuerCount {
    pub issuer: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryBreakdown {
    #[serde(flatten)]
    pub stats: PartitionStats,
    pub currencies: BTreeSet<Currency>,
    pub product_types: BTreeSet<ProductType>,
    pub top_issuers: Vec<IssuerCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencyBreakdown {
    #[serde(flatten)]
    pub stats: PartitionStats,
    pub countries: BTreeSet<Country>,
    pub product_types: BTreeSet<ProductType>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskLevelBreakdown {
    #[serde(flatten)]
    pub stats: PartitionStats,
    pub countries: BTreeSet<Country>,
    pub currencies: BTreeSet<Currency>,
    pub product_types: BTreeSet<ProductType>,
    pub top_issuers: Vec<IssuerCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductTypeBreakdown {
    #[serde(flatten)]
    pub stats: PartitionStats,
    pub countries: BTreeSet<Country>,
    pub currencies: BTreeSet<Currency>,
    /// Mean coupon over the products that have one; `None` if none do.
    #[serde(with = "rust_decimal::serde::float_option")]
    pub average_coupon: Option<Decimal>,
}

/// One entry of the global issuer ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssuerStats {
    pub issuer: String,
    pub count: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_value: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub average_value: Decimal,
    pub countries: BTreeSet<Country>,
    pub currencies: BTreeSet<Currency>,
    pub product_types: BTreeSet<ProductType>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyStats {
    pub count: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_value: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub average_value: Decimal,
    pub countries: BTreeSet<Country>,
    pub currencies: BTreeSet<Currency>,
}

/// Calendar month of an issue date, rendered as `YYYY-MM`.
///
/// Ordering is chronological, which matches the lexicographic order of the
/// rendered keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl From<NaiveDate> for MonthKey {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A quick overview of a collection, without the per-dimension breakdowns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionSummary {
    pub total_count: usize,
    pub date_range: DateRange,
    pub countries: BTreeSet<Country>,
    pub currencies: BTreeSet<Currency>,
    pub product_types: BTreeSet<ProductType>,
    pub risk_levels: BTreeSet<RiskLevel>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_nominal_value: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub average_nominal_value: Decimal,
}
