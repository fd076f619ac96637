use crate::accumulator::{group_by, group_by_issuer};
use crate::filter::ProductFilter;
use crate::report::{
    AggregationResult, CollectionSummary, CountryBreakdown, CurrencyBreakdown, MonthKey,
    ProductTypeBreakdown, RiskLevelBreakdown,
};
use configuration::AnalysisConfig;
use core_types::{Product, ProductCollection};
use rust_decimal::Decimal;

/// A stateless calculator for deriving aggregate statistics from a product collection.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    config: AnalysisConfig,
}

impl AnalyticsEngine {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// The main entry point for calculating aggregate statistics.
    ///
    /// # Arguments
    ///
    /// * `collection` - The validated products to analyze.
    ///
    /// # Returns
    ///
    /// A freshly computed `AggregationResult`. An empty collection is not an
    /// error: it yields the zeroed result.
    pub fn analyze(&self, collection: &ProductCollection) -> AggregationResult {
        let mut result = AggregationResult::new();

        if collection.is_empty() {
            tracing::warn!("No products to analyze; returning an empty result.");
            return result;
        }

        tracing::info!(products = collection.len(), "Starting SRP analysis.");

        let products = collection.products();
        self.calculate_basic_stats(products, &mut result);
        self.calculate_by_country(products, &mut result);
        self.calculate_by_currency(products, &mut result);
        self.calculate_by_risk_level(products, &mut result);
        self.calculate_by_product_type(products, &mut result);
        self.calculate_top_issuers(products, &mut result);
        self.calculate_monthly_evolution(products, &mut result);

        tracing::info!(
            total_value = %result.total_value,
            issuers = result.top_issuers.len(),
            months = result.monthly_evolution.len(),
            "SRP analysis complete."
        );
        result
    }

    /// Returns the products matching every predicate of `filter`, in collection order.
    pub fn filter<'a>(&self, collection: &'a ProductCollection, filter: &ProductFilter) -> Vec<&'a Product> {
        let matched: Vec<&Product> = collection.iter().filter(|p| filter.matches(p)).collect();
        tracing::debug!(matched = matched.len(), total = collection.len(), "Filter applied.");
        matched
    }

    /// Overview of the collection, or `None` when it is empty.
    pub fn summary(&self, collection: &ProductCollection) -> Option<CollectionSummary> {
        let date_range = collection.date_range()?;
        let all = group_by(collection.products(), |_| ()).remove(&())?;

        Some(CollectionSummary {
            total_count: all.count,
            date_range,
            average_nominal_value: all.average_value(),
            total_nominal_value: all.total_value,
            countries: all.countries,
            currencies: all.currencies,
            product_types: all.product_types,
            risk_levels: all.risk_distribution.into_keys().collect(),
        })
    }

    /// Calculates product count, total and average nominal value.
    fn calculate_basic_stats(&self, products: &[Product], result: &mut AggregationResult) {
        result.total_products = products.len();
        result.total_value = products.iter().map(Product::nominal_value).sum();

        if result.total_products > 0 {
            result.average_nominal_value = result.total_value / Decimal::from(result.total_products);
        }

        tracing::debug!(
            products = result.total_products,
            total_value = %result.total_value,
            "Basic statistics calculated."
        );
    }

    fn calculate_by_country(&self, products: &[Product], result: &mut AggregationResult) {
        let limit = self.config.top_issuers_per_country;

        result.by_country = group_by(products, Product::country)
            .into_iter()
            .map(|(country, acc)| {
                let breakdown = CountryBreakdown {
                    stats: acc.partition_stats(),
                    top_issuers: acc.issuers.top(limit),
                    currencies: acc.currencies,
                    product_types: acc.product_types,
                };
                (country, breakdown)
            })
            .collect();

        tracing::debug!(countries = result.by_country.len(), "Country breakdown calculated.");
    }

    fn calculate_by_currency(&self, products: &[Product], result: &mut AggregationResult) {
        result.by_currency = group_by(products, Product::currency)
            .into_iter()
            .map(|(currency, acc)| {
                let breakdown = CurrencyBreakdown {
                    stats: acc.partition_stats(),
                    countries: acc.countries,
                    product_types: acc.product_types,
                };
                (currency, breakdown)
            })
            .collect();

        tracing::debug!(currencies = result.by_currency.len(), "Currency breakdown calculated.");
    }

    fn calculate_by_risk_level(&self, products: &[Product], result: &mut AggregationResult) {
        let limit = self.config.top_issuers_per_risk_level;

        result.by_risk_level = group_by(products, Product::risk_level)
            .into_iter()
            .map(|(risk_level, acc)| {
                let breakdown = RiskLevelBreakdown {
                    stats: acc.partition_stats(),
                    top_issuers: acc.issuers.top(limit),
                    countries: acc.countries,
                    currencies: acc.currencies,
                    product_types: acc.product_types,
                };
                (risk_level, breakdown)
            })
            .collect();

        tracing::debug!(levels = result.by_risk_level.len(), "Risk level breakdown calculated.");
    }

    fn calculate_by_product_type(&self, products: &[Product], result: &mut AggregationResult) {
        result.by_product_type = group_by(products, Product::product_type)
            .into_iter()
            .map(|(product_type, acc)| {
                let breakdown = ProductTypeBreakdown {
                    stats: acc.partition_stats(),
                    average_coupon: acc.average_coupon(),
                    countries: acc.countries,
                    currencies: acc.currencies,
                };
                (product_type, breakdown)
            })
            .collect();

        tracing::debug!(types = result.by_product_type.len(), "Product type breakdown calculated.");
    }

    /// Ranks issuers by total nominal value, descending.
    fn calculate_top_issuers(&self, products: &[Product], result: &mut AggregationResult) {
        let mut ranked: Vec<_> = group_by_issuer(products)
            .into_iter()
            .map(|(issuer, acc)| acc.issuer_stats(issuer))
            .collect();

        // Stable sort: equal totals keep the order in which issuers first appeared.
        ranked.sort_by(|a, b| b.total_value.cmp(&a.total_value));
        ranked.truncate(self.config.top_issuers);
        result.top_issuers = ranked;

        tracing::debug!(issuers = result.top_issuers.len(), "Issuer ranking calculated.");
    }

    fn calculate_monthly_evolution(&self, products: &[Product], result: &mut AggregationResult) {
        result.monthly_evolution = group_by(products, |p| MonthKey::from(p.issue_date()))
            .into_iter()
            .map(|(month, acc)| (month, acc.monthly_stats()))
            .collect();

        tracing::debug!(months = result.monthly_evolution.len(), "Monthly evolution calculated.");
    }
}
