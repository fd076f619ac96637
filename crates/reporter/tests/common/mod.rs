//! Shared fixtures for the reporter integration tests.

#![allow(dead_code)]

use analytics::{AggregationResult, AnalyticsEngine};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use core_types::{Country, Currency, NewProduct, Product, ProductCollection, ProductType, RiskLevel};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub fn generated_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 10, 1, 9, 30, 0).unwrap()
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    issuer: &str,
    country: Country,
    currency: Currency,
    nominal_value: Decimal,
    product_type: ProductType,
    risk_level: RiskLevel,
    issue_date: (i32, u32, u32),
) -> Product {
    let (y, m, d) = issue_date;
    Product::new(NewProduct::required(
        id,
        "Note Structurée CAC 40",
        issuer,
        country,
        currency,
        NaiveDate::from_ymd_opt(y, m, d).unwrap(),
        nominal_value,
        product_type,
        risk_level,
    ))
    .unwrap()
}

pub fn collection() -> ProductCollection {
    vec![
        product("R1", "BNP Paribas", Country::France, Currency::Eur, dec!(1234567.5), ProductType::Bond, RiskLevel::Medium, (2024, 8, 15)),
        product("R2", "Caisse d'Épargne <Ile-de-France>", Country::France, Currency::Eur, dec!(20000), ProductType::Note, RiskLevel::Low, (2024, 8, 20)),
        product("R3", "KBC Bank", Country::Belgium, Currency::Usd, dec!(15000), ProductType::Note, RiskLevel::High, (2024, 9, 2)),
    ]
    .into_iter()
    .collect()
}

pub fn result() -> AggregationResult {
    AnalyticsEngine::default().analyze(&collection())
}
