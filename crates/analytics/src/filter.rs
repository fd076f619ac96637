use crate::error::AnalyticsError;
use configuration::DefaultFilter;
use core_types::{Country, Currency, Product, ProductType, RiskLevel};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fmt::Display;
use std::str::FromStr;

/// A conjunction of optional predicates over products.
///
/// A `None` field places no constraint on its dimension. When deserialized
/// (e.g. from a JSON object), unknown keys are ignored.
///
/// A categorical value naming no known variant (country `DE`, risk level `7`)
/// cannot equal any product's, so such a filter matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProductFilter {
    pub country: Option<Country>,
    pub currency: Option<Currency>,
    pub product_type: Option<ProductType>,
    pub risk_level: Option<RiskLevel>,
    pub min_nominal_value: Option<Decimal>,
    pub max_nominal_value: Option<Decimal>,
    /// Case-insensitive substring of the issuer name.
    pub issuer: Option<String>,
    pub max_risk_level: Option<RiskLevel>,
    /// Any-of currency constraint.
    pub currencies: Option<Vec<Currency>>,
    /// Set when a categorical predicate named an unknown variant.
    #[serde(skip)]
    matches_nothing: bool,
}

impl ProductFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a filter from named string predicates.
    ///
    /// Recognized keys: `country`, `currency`, `product_type`, `risk_level`,
    /// `min_nominal_value`, `max_nominal_value`, `issuer`, `max_risk_level`
    /// and `currencies` (comma separated). Unknown keys are ignored. An unknown
    /// categorical value makes the filter match nothing; a nominal bound that
    /// is not a number is an error.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, AnalyticsError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Self::default().with_pairs(pairs)
    }

    /// Same as [`ProductFilter::from_pairs`], layering the pairs over the
    /// predicates already set.
    pub fn with_pairs<'a, I>(self, pairs: I) -> Result<Self, AnalyticsError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut filter = self;

        for (key, value) in pairs {
            match key {
                "country" => filter.country = filter.variant("country", value),
                "currency" => filter.currency = filter.variant("currency", value),
                "product_type" => filter.product_type = filter.variant("product_type", value),
                "risk_level" => filter.risk_level = filter.variant("risk_level", value),
                "max_risk_level" => filter.max_risk_level = filter.variant("max_risk_level", value),
                "min_nominal_value" => filter.min_nominal_value = Some(parse_amount("min_nominal_value", value)?),
                "max_nominal_value" => filter.max_nominal_value = Some(parse_amount("max_nominal_value", value)?),
                "issuer" => filter.issuer = Some(value.to_string()),
                "currencies" => {
                    // Unknown codes drop out of the allowed set.
                    let currencies = value
                        .split(',')
                        .filter_map(|code| code.trim().parse::<Currency>().ok())
                        .collect();
                    filter.currencies = Some(currencies);
                }
                unknown => tracing::debug!(key = unknown, "Ignoring unknown filter key."),
            }
        }

        Ok(filter)
    }

    pub fn country(mut self, country: Country) -> Self {
        self.country = Some(country);
        self
    }

    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = Some(currency);
        self
    }

    pub fn product_type(mut self, product_type: ProductType) -> Self {
        self.product_type = Some(product_type);
        self
    }

    pub fn risk_level(mut self, risk_level: RiskLevel) -> Self {
        self.risk_level = Some(risk_level);
        self
    }

    pub fn min_nominal_value(mut self, value: Decimal) -> Self {
        self.min_nominal_value = Some(value);
        self
    }

    pub fn max_nominal_value(mut self, value: Decimal) -> Self {
        self.max_nominal_value = Some(value);
        self
    }

    pub fn issuer(mut self, needle: impl Into<String>) -> Self {
        self.issuer = Some(needle.into());
        self
    }

    /// True when the filter places no constraint at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, product: &Product) -> bool {
        if self.matches_nothing {
            return false;
        }

        let issuer_matches = match &self.issuer {
            Some(needle) => product
                .issuer()
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            None => true,
        };

        issuer_matches
            && self.country.is_none_or(|c| product.country() == c)
            && self.currency.is_none_or(|c| product.currency() == c)
            && self.product_type.is_none_or(|t| product.product_type() == t)
            && self.risk_level.is_none_or(|r| product.risk_level() == r)
            && self.max_risk_level.is_none_or(|r| product.risk_level() <= r)
            && self.min_nominal_value.is_none_or(|v| product.nominal_value() >= v)
            && self.max_nominal_value.is_none_or(|v| product.nominal_value() <= v)
            && self
                .currencies
                .as_ref()
                .is_none_or(|allowed| allowed.contains(&product.currency()))
    }
}

impl From<&DefaultFilter> for ProductFilter {
    fn from(defaults: &DefaultFilter) -> Self {
        Self {
            min_nominal_value: Some(defaults.min_nominal_value),
            max_risk_level: Some(defaults.max_risk_level),
            currencies: Some(defaults.currencies.clone()),
            ..Self::default()
        }
    }
}

impl ProductFilter {
    /// Parses a categorical predicate. An unknown variant clears the
    /// predicate and turns the whole filter into one that matches nothing.
    fn variant<T>(&mut self, key: &'static str, value: &str) -> Option<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        match value.trim().parse::<T>() {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::debug!(key, value, reason = %e, "Filter value matches no product.");
                self.matches_nothing = true;
                None
            }
        }
    }
}

fn parse_amount(key: &'static str, value: &str) -> Result<Decimal, AnalyticsError> {
    value
        .trim()
        .parse::<Decimal>()
        .map_err(|e| AnalyticsError::InvalidFilter {
            key,
            value: value.to_string(),
            reason: e.to_string(),
        })
}
