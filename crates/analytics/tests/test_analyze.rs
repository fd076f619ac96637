//! Aggregation engine integration tests.

mod common;

use analytics::{AnalyticsEngine, MonthKey};
use core_types::{Country, Currency, MAX_NOMINAL_VALUE, ProductCollection, ProductType, RiskLevel};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ---------------------------------------------------------------------------
// Overall figures
// ---------------------------------------------------------------------------

#[test]
fn two_product_scenario() {
    let collection = common::two_products();
    let result = AnalyticsEngine::default().analyze(&collection);

    assert_eq!(result.total_products, 2);
    assert_eq!(result.total_value, dec!(25000));
    assert_eq!(result.average_nominal_value, dec!(12500));
    assert_eq!(result.by_country.len(), 2);
    assert_eq!(result.by_country[&Country::France].stats.count, 1);
    assert_eq!(result.by_country[&Country::Belgium].stats.count, 1);
}

#[test]
fn empty_collection_yields_zeroed_result() {
    let result = AnalyticsEngine::default().analyze(&ProductCollection::new());

    assert!(result.is_empty());
    assert_eq!(result.total_products, 0);
    assert_eq!(result.total_value, Decimal::ZERO);
    assert_eq!(result.average_nominal_value, Decimal::ZERO);
    assert!(result.by_country.is_empty());
    assert!(result.by_currency.is_empty());
    assert!(result.by_risk_level.is_empty());
    assert!(result.by_product_type.is_empty());
    assert!(result.top_issuers.is_empty());
    assert!(result.monthly_evolution.is_empty());
}

#[test]
fn totals_match_the_collection() {
    let collection = common::mixed_products();
    let result = AnalyticsEngine::default().analyze(&collection);

    let expected_total: Decimal = collection.iter().map(|p| p.nominal_value()).sum();
    assert_eq!(result.total_products, collection.len());
    assert_eq!(result.total_value, expected_total);
    assert_eq!(result.total_value, dec!(156000));
    assert_eq!(result.average_nominal_value, expected_total / Decimal::from(collection.len()));
}

#[test]
fn largest_nominal_values_aggregate_without_overflow() {
    let mut collection = ProductCollection::new();
    for n in 0..1_000 {
        collection.add(common::product(
            &format!("BIG_{n:04}"),
            "Big Bank",
            Country::France,
            Currency::Eur,
            MAX_NOMINAL_VALUE,
            ProductType::Bond,
            RiskLevel::Medium,
            "2024-08-15",
        ));
    }

    let result = AnalyticsEngine::default().analyze(&collection);
    assert_eq!(result.total_value, MAX_NOMINAL_VALUE * Decimal::from(1_000));
    assert_eq!(result.average_nominal_value, MAX_NOMINAL_VALUE);
    assert_eq!(result.top_issuers[0].total_value, result.total_value);
}

// ---------------------------------------------------------------------------
// Categorical breakdowns
// ---------------------------------------------------------------------------

#[test]
fn every_product_lands_in_exactly_one_partition_per_dimension() {
    let collection = common::mixed_products();
    let result = AnalyticsEngine::default().analyze(&collection);
    let n = collection.len();

    assert_eq!(result.by_country.values().map(|b| b.stats.count).sum::<usize>(), n);
    assert_eq!(result.by_currency.values().map(|b| b.stats.count).sum::<usize>(), n);
    assert_eq!(result.by_risk_level.values().map(|b| b.stats.count).sum::<usize>(), n);
    assert_eq!(result.by_product_type.values().map(|b| b.stats.count).sum::<usize>(), n);
    assert_eq!(result.monthly_evolution.values().map(|m| m.count).sum::<usize>(), n);
}

#[test]
fn breakdowns_are_sparse() {
    let result = AnalyticsEngine::default().analyze(&common::mixed_products());

    assert!(!result.by_currency.contains_key(&Currency::Jpy));
    assert!(!result.by_product_type.contains_key(&ProductType::Swap));
    assert!(result.by_country.values().all(|b| b.stats.count > 0));
    assert!(result.by_currency.values().all(|b| b.stats.count > 0));
    assert!(result.by_risk_level.values().all(|b| b.stats.count > 0));
    assert!(result.by_product_type.values().all(|b| b.stats.count > 0));
}

#[test]
fn country_breakdown_details() {
    let result = AnalyticsEngine::default().analyze(&common::mixed_products());
    let france = &result.by_country[&Country::France];

    assert_eq!(france.stats.count, 5);
    assert_eq!(france.stats.total_value, dec!(96000));
    assert_eq!(france.stats.average_value, dec!(19200));
    assert_eq!(
        france.currencies.iter().copied().collect::<Vec<_>>(),
        vec![Currency::Eur, Currency::Usd, Currency::Gbp]
    );
    assert_eq!(france.stats.risk_distribution[&RiskLevel::Low], 2);

    let issuers: Vec<(&str, usize)> = france
        .top_issuers
        .iter()
        .map(|c| (c.issuer.as_str(), c.count))
        .collect();
    assert_eq!(
        issuers,
        vec![
            ("BNP Paribas", 2),
            ("Société Générale", 1),
            ("LCL", 1),
            ("bnp paribas", 1),
        ]
    );
}

#[test]
fn risk_level_breakdown_caps_issuers_at_three() {
    let result = AnalyticsEngine::default().analyze(&common::mixed_products());

    let high = &result.by_risk_level[&RiskLevel::High];
    assert_eq!(high.stats.count, 2);
    assert_eq!(high.top_issuers.len(), 1);
    assert_eq!(high.top_issuers[0].issuer, "KBC Bank");
    assert_eq!(high.top_issuers[0].count, 2);
    assert!(result.by_risk_level.values().all(|b| b.top_issuers.len() <= 3));

    let keys: Vec<_> = result.by_risk_level.keys().copied().collect();
    assert_eq!(keys, RiskLevel::ALL.to_vec());
}

#[test]
fn product_type_breakdown_averages_only_present_coupons() {
    let result = AnalyticsEngine::default().analyze(&common::mixed_products());

    assert_eq!(result.by_product_type[&ProductType::Bond].average_coupon, Some(dec!(4)));
    assert_eq!(result.by_product_type[&ProductType::Certificate].average_coupon, Some(dec!(6)));
    assert_eq!(result.by_product_type[&ProductType::Note].average_coupon, None);
}

#[test]
fn currency_breakdown_lists_countries() {
    let result = AnalyticsEngine::default().analyze(&common::mixed_products());
    let eur = &result.by_currency[&Currency::Eur];

    assert_eq!(eur.stats.count, 5);
    assert_eq!(eur.stats.total_value, dec!(106000));
    assert_eq!(eur.countries.len(), 2);
}

// ---------------------------------------------------------------------------
// Issuer ranking
// ---------------------------------------------------------------------------

#[test]
fn issuers_are_ranked_by_total_value_with_stable_ties() {
    let result = AnalyticsEngine::default().analyze(&common::mixed_products());
    let names: Vec<&str> = result.top_issuers.iter().map(|i| i.issuer.as_str()).collect();

    assert_eq!(
        names,
        vec![
            "BNP Paribas",
            "KBC Bank",
            "Société Générale",
            "Belfius Bank",
            "LCL",
            "bnp paribas",
        ]
    );
    assert!(result
        .top_issuers
        .windows(2)
        .all(|w| w[0].total_value >= w[1].total_value));

    let bnp = &result.top_issuers[0];
    assert_eq!(bnp.count, 2);
    assert_eq!(bnp.total_value, dec!(60000));
    assert_eq!(bnp.average_value, dec!(30000));
    assert_eq!(bnp.currencies.len(), 2);
}

#[test]
fn issuer_ranking_is_truncated_to_ten() {
    let mut collection = ProductCollection::new();
    for i in 0..15u32 {
        collection.add(common::product(
            &format!("P{i:02}"),
            &format!("Issuer {i:02}"),
            Country::France,
            Currency::Eur,
            Decimal::from(1000 + i),
            ProductType::Bond,
            RiskLevel::Medium,
            "2024-09-01",
        ));
    }

    let result = AnalyticsEngine::default().analyze(&collection);
    assert_eq!(result.top_issuers.len(), 10);
    assert_eq!(result.top_issuers[0].issuer, "Issuer 14");
    assert_eq!(result.top_issuers[9].issuer, "Issuer 05");
}

// ---------------------------------------------------------------------------
// Temporal evolution
// ---------------------------------------------------------------------------

#[test]
fn monthly_evolution_is_keyed_by_year_and_month() {
    let result = AnalyticsEngine::default().analyze(&common::mixed_products());

    let keys: Vec<String> = result.monthly_evolution.keys().map(MonthKey::to_string).collect();
    assert_eq!(keys, vec!["2024-08", "2024-09", "2024-10"]);

    let october = &result.monthly_evolution[&MonthKey { year: 2024, month: 10 }];
    assert_eq!(october.count, 3);
    assert_eq!(october.total_value, dec!(16000));
    assert_eq!(october.countries.len(), 2);
    assert_eq!(october.currencies.len(), 2);
}

// ---------------------------------------------------------------------------
// JSON shape
// ---------------------------------------------------------------------------

#[test]
fn result_serializes_with_string_keys_and_numeric_values() {
    let result = AnalyticsEngine::default().analyze(&common::two_products());
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["total_products"], 2);
    assert_eq!(json["total_value"], serde_json::json!(25000.0));
    assert_eq!(json["by_country"]["FR"]["count"], 1);
    assert_eq!(json["by_currency"]["USD"]["countries"], serde_json::json!(["BE"]));
    assert_eq!(json["by_risk_level"]["3"]["count"], 1);
    assert_eq!(json["by_product_type"]["bond"]["average_coupon"], serde_json::Value::Null);
    assert_eq!(json["by_country"]["BE"]["risk_distribution"]["2"], 1);
    assert_eq!(json["monthly_evolution"]["2024-08"]["count"], 2);
    assert_eq!(json["top_issuers"][0]["issuer"], "Test Bank B");
}
