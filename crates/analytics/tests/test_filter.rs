//! Product filtering integration tests.

mod common;

use analytics::{AnalyticsEngine, ProductFilter};
use core_types::{Country, Currency, RiskLevel};
use rust_decimal_macros::dec;

#[test]
fn country_filter_returns_the_french_product() {
    let collection = common::two_products();
    let engine = AnalyticsEngine::default();

    let filter = ProductFilter::from_pairs([("country", "FR")]).unwrap();
    let french = engine.filter(&collection, &filter);
    assert_eq!(french.len(), 1);
    assert_eq!(french[0].id(), "TEST_001");
    assert_eq!(french[0].country(), Country::France);
}

#[test]
fn currency_and_risk_filters() {
    let collection = common::two_products();
    let engine = AnalyticsEngine::default();

    let usd = engine.filter(&collection, &ProductFilter::new().currency(Currency::Usd));
    assert_eq!(usd.len(), 1);
    assert_eq!(usd[0].currency(), Currency::Usd);

    let low = engine.filter(&collection, &ProductFilter::from_pairs([("risk_level", "2")]).unwrap());
    assert_eq!(low.len(), 1);
    assert_eq!(low[0].risk_level(), RiskLevel::Low);
}

#[test]
fn unknown_country_code_yields_no_products() {
    let collection = common::two_products();
    let engine = AnalyticsEngine::default();

    let filter = ProductFilter::from_pairs([("country", "DE")]).unwrap();
    assert!(engine.filter(&collection, &filter).is_empty());
}

#[test]
fn unknown_predicate_is_a_no_op() {
    let collection = common::two_products();
    let engine = AnalyticsEngine::default();

    let filter = ProductFilter::from_pairs([("rating", "AAA")]).unwrap();
    assert!(filter.is_empty());
    assert_eq!(engine.filter(&collection, &filter).len(), 2);
}

#[test]
fn predicates_are_combined_with_and_and_keep_order() {
    let collection = common::mixed_products();
    let engine = AnalyticsEngine::default();

    let filter = ProductFilter::new()
        .country(Country::France)
        .min_nominal_value(dec!(5000))
        .max_nominal_value(dec!(30000));
    let ids: Vec<&str> = engine.filter(&collection, &filter).iter().map(|p| p.id()).collect();
    assert_eq!(ids, vec!["M03", "M04", "M07"]);
}

#[test]
fn issuer_filter_is_case_insensitive_substring() {
    let collection = common::mixed_products();
    let engine = AnalyticsEngine::default();

    let ids: Vec<&str> = engine
        .filter(&collection, &ProductFilter::new().issuer("PARIBAS"))
        .iter()
        .map(|p| p.id())
        .collect();
    assert_eq!(ids, vec!["M01", "M04", "M08"]);
}

#[test]
fn default_thresholds_filter() {
    let collection = common::mixed_products();
    let engine = AnalyticsEngine::default();

    let filter = ProductFilter::from(&engine.config().default_filter);
    let ids: Vec<&str> = engine.filter(&collection, &filter).iter().map(|p| p.id()).collect();
    // CHF is not in the default currency list.
    assert_eq!(ids, vec!["M01", "M02", "M03", "M04", "M05", "M07", "M08"]);
}
