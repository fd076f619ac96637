//! Synthetic SRP data for demos and manual testing.

use crate::error::IngestError;
use chrono::{Days, NaiveDate, Utc};
use core_types::{Country, Currency, ProductType, RawProduct, RiskLevel};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use serde_json::json;
use std::fs;
use std::path::Path;

const ISSUERS: [&str; 14] = [
    "BNP Paribas",
    "Société Générale",
    "Crédit Agricole",
    "LCL",
    "Crédit Mutuel",
    "Banque Populaire",
    "Caisse d'Épargne",
    "HSBC France",
    "Deutsche Bank France",
    "ING Belgique",
    "KBC Bank",
    "Belfius Bank",
    "Argenta Bank",
    "AXA Bank",
];

const PRODUCT_NAMES: [&str; 10] = [
    "Obligation Indexée Actions Européennes",
    "Note Structurée CAC 40",
    "Certificat de Performance",
    "Warrant Call CAC 40",
    "Note à Coupon Variable",
    "Obligation à Taux Révisable",
    "Certificat de Dépôt",
    "Note à Capital Garanti",
    "Warrant Put Euro Stoxx 50",
    "Obligation Indexée Matières Premières",
];

const UNDERLYINGS: [&str; 10] = [
    "CAC 40",
    "Euro Stoxx 50",
    "S&P 500",
    "Actions Européennes",
    "Matières Premières",
    "Taux d'Intérêt",
    "Devises",
    "Actions Asiatiques",
    "Actions Émergentes",
    "Indices Sectoriels",
];

const RATINGS: [Option<&str>; 8] = [
    Some("AAA"),
    Some("AA"),
    Some("A"),
    Some("BBB"),
    Some("BB"),
    Some("B"),
    Some("CCC"),
    None,
];

const LIQUIDITY: [&str; 3] = ["High", "Medium", "Low"];

/// Share of generated products denominated in EUR; the rest is USD or GBP.
const EUR_SHARE: f64 = 0.8;

/// Generates plausible raw product records.
///
/// Issue dates fall uniformly in `[start, end]`, maturities 1 to 10 years
/// later. Nominal values range from 1 000 to 100 000 and coupons from 0 to 8 %.
pub struct SampleGenerator {
    start: NaiveDate,
    end: NaiveDate,
    countries: Vec<Country>,
    rng: StdRng,
}

impl SampleGenerator {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, IngestError> {
        if start > end {
            return Err(IngestError::InvalidDateRange { start, end });
        }
        Ok(Self {
            start,
            end,
            countries: Country::ALL.to_vec(),
            rng: StdRng::from_entropy(),
        })
    }

    /// Makes the output reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Restricts generated products to `countries`. An empty list keeps all.
    pub fn with_countries(mut self, countries: &[Country]) -> Self {
        if !countries.is_empty() {
            self.countries = countries.to_vec();
        }
        self
    }

    pub fn generate(&mut self, count: usize) -> Vec<RawProduct> {
        let records: Vec<RawProduct> = (1..=count).map(|n| self.record(n)).collect();
        tracing::info!(count, start = %self.start, end = %self.end, "Sample products generated.");
        records
    }

    fn record(&mut self, n: usize) -> RawProduct {
        let span = self.end.signed_duration_since(self.start).num_days().max(0) as u64;
        let issue_date = self.start + Days::new(self.rng.gen_range(0..=span));
        let maturity_date = issue_date + Days::new(self.rng.gen_range(365..=3650));

        let nominal: u32 = self.rng.gen_range(1_000..=100_000);
        let coupon_bp: u32 = self.rng.gen_range(0..=800);
        let fees_bp: u32 = self.rng.gen_range(50..=300);

        let country = pick(&mut self.rng, &self.countries);
        let currency = if self.rng.gen_bool(EUR_SHARE) {
            Currency::Eur
        } else {
            pick(&mut self.rng, &[Currency::Usd, Currency::Gbp])
        };
        let product_type = pick(&mut self.rng, &ProductType::ALL);
        let risk_level = pick(&mut self.rng, &RiskLevel::ALL);
        let isin: u64 = self.rng.gen_range(1_000_000_000_000..=9_999_999_999_999);

        RawProduct {
            id: Some(json!(format!("SRP_{n:06}"))),
            name: Some(json!(pick(&mut self.rng, &PRODUCT_NAMES))),
            issuer: Some(json!(pick(&mut self.rng, &ISSUERS))),
            country: Some(json!(country.code())),
            currency: Some(json!(currency.code())),
            issue_date: Some(json!(issue_date.to_string())),
            maturity_date: Some(json!(maturity_date.to_string())),
            nominal_value: Some(json!(nominal)),
            coupon_rate: Some(json!(f64::from(coupon_bp) / 100.0)),
            product_type: Some(json!(product_type.code())),
            underlying_asset: Some(json!(pick(&mut self.rng, &UNDERLYINGS))),
            risk_level: Some(json!(risk_level.code())),
            rating: pick(&mut self.rng, &RATINGS).map(|r| json!(r)),
            isin: Some(json!(format!("{}{isin}", country.code()))),
            cusip: None,
            min_investment: Some(json!((f64::from(nominal) / 10.0).max(1_000.0))),
            max_investment: Some(json!(u64::from(nominal) * 10)),
            liquidity: Some(json!(pick(&mut self.rng, &LIQUIDITY))),
            fees: Some(json!(f64::from(fees_bp) / 100.0)),
        }
    }
}

fn pick<T: Copy>(rng: &mut StdRng, items: &[T]) -> T {
    items[rng.gen_range(0..items.len())]
}

#[derive(Serialize)]
struct SampleFile<'a> {
    products: &'a [RawProduct],
    metadata: SampleMetadata,
}

#[derive(Serialize)]
struct SampleMetadata {
    generated_at: NaiveDate,
    total_count: usize,
    description: &'static str,
}

/// Writes `records` as `{"products": [...], "metadata": {...}}`, the wrapped
/// layout `FileSource` reads back.
pub fn write_sample_file(path: &Path, records: &[RawProduct]) -> Result<(), IngestError> {
    let file = SampleFile {
        products: records,
        metadata: SampleMetadata {
            generated_at: Utc::now().date_naive(),
            total_count: records.len(),
            description: "Automatically generated SRP test data",
        },
    };

    let io_error = |source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    };
    let json = serde_json::to_string_pretty(&file).map_err(|source| IngestError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    fs::write(path, json).map_err(io_error)?;

    tracing::info!(path = %path.display(), count = records.len(), "Sample file written.");
    Ok(())
}
