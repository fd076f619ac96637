use crate::enums::{Country, Currency, RiskLevel};
use crate::error::RecordError;
use crate::product::Product;
use crate::raw::RawProduct;
use chrono::NaiveDate;
use serde::Serialize;

/// Earliest and latest issue date in a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// An append-only, insertion-ordered set of validated products.
///
/// The distinct country and currency lists are kept in first-seen order and
/// are updated as products are added.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductCollection {
    products: Vec<Product>,
    total_count: usize,
    countries: Vec<Country>,
    currencies: Vec<Currency>,
}

/// Result of converting a batch of raw records.
#[derive(Debug, Clone, Default)]
pub struct ConversionOutcome {
    pub collection: ProductCollection,
    /// One entry per skipped record, in input order.
    pub errors: Vec<RecordError>,
}

impl ProductCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Converts raw records one by one. Invalid records are skipped and
    /// reported; they never abort the batch.
    pub fn from_raw<I>(records: I) -> ConversionOutcome
    where
        I: IntoIterator<Item = RawProduct>,
    {
        let mut outcome = ConversionOutcome::default();

        for (index, raw) in records.into_iter().enumerate() {
            match Product::try_from(&raw) {
                Ok(product) => outcome.collection.add(product),
                Err(error) => {
                    let id = raw.id_text();
                    tracing::warn!(index, id = ?id, %error, "Skipping invalid product record.");
                    outcome.errors.push(RecordError { index, id, error });
                }
            }
        }

        tracing::info!(
            accepted = outcome.collection.len(),
            rejected = outcome.errors.len(),
            "Raw product conversion finished."
        );
        outcome
    }

    /// Appends a product and records any country or currency not seen before.
    pub fn add(&mut self, product: Product) {
        if !self.countries.contains(&product.country()) {
            self.countries.push(product.country());
        }
        if !self.currencies.contains(&product.currency()) {
            self.currencies.push(product.currency());
        }
        self.products.push(product);
        self.total_count = self.products.len();
    }

    pub fn len(&self) -> usize {
        self.total_count
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    /// Distinct countries in the order they were first added.
    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    /// Distinct currencies in the order they were first added.
    pub fn currencies(&self) -> &[Currency] {
        &self.currencies
    }

    pub fn by_country(&self, country: Country) -> Vec<&Product> {
        self.products.iter().filter(|p| p.country() == country).collect()
    }

    pub fn by_currency(&self, currency: Currency) -> Vec<&Product> {
        self.products.iter().filter(|p| p.currency() == currency).collect()
    }

    pub fn by_risk_level(&self, risk_level: RiskLevel) -> Vec<&Product> {
        self.products.iter().filter(|p| p.risk_level() == risk_level).collect()
    }

    pub fn date_range(&self) -> Option<DateRange> {
        let start = self.products.iter().map(Product::issue_date).min()?;
        let end = self.products.iter().map(Product::issue_date).max()?;
        Some(DateRange { start, end })
    }
}

impl<'a> IntoIterator for &'a ProductCollection {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}

impl FromIterator<Product> for ProductCollection {
    fn from_iter<T: IntoIterator<Item = Product>>(iter: T) -> Self {
        let mut collection = ProductCollection::new();
        for product in iter {
            collection.add(product);
        }
        collection
    }
}

impl Extend<Product> for ProductCollection {
    fn extend<T: IntoIterator<Item = Product>>(&mut self, iter: T) {
        for product in iter {
            self.add(product);
        }
    }
}
