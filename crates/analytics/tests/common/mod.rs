//! Shared fixtures for the analytics integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use core_types::{Country, Currency, NewProduct, Product, ProductCollection, ProductType, RiskLevel};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Builds a validated product with the given categorical attributes.
#[allow(clippy::too_many_arguments)]
pub fn product(
    id: &str,
    issuer: &str,
    country: Country,
    currency: Currency,
    nominal_value: Decimal,
    product_type: ProductType,
    risk_level: RiskLevel,
    issue_date: &str,
) -> Product {
    let date = NaiveDate::parse_from_str(issue_date, "%Y-%m-%d").unwrap();
    Product::new(NewProduct::required(
        id,
        format!("Product {id}"),
        issuer,
        country,
        currency,
        date,
        nominal_value,
        product_type,
        risk_level,
    ))
    .unwrap()
}

/// Same as [`product`] with a coupon rate attached.
pub fn product_with_coupon(base: Product, coupon_rate: Decimal) -> Product {
    let mut draft = NewProduct::required(
        base.id(),
        base.name(),
        base.issuer(),
        base.country(),
        base.currency(),
        base.issue_date(),
        base.nominal_value(),
        base.product_type(),
        base.risk_level(),
    );
    draft.coupon_rate = Some(coupon_rate);
    Product::new(draft).unwrap()
}

/// The two-record collection used throughout the scenarios:
/// (FR, EUR, 10000, bond, medium) and (BE, USD, 15000, note, low).
pub fn two_products() -> ProductCollection {
    let mut collection = ProductCollection::new();
    collection.add(product(
        "TEST_001",
        "Test Bank A",
        Country::France,
        Currency::Eur,
        dec!(10000),
        ProductType::Bond,
        RiskLevel::Medium,
        "2024-08-15",
    ));
    collection.add(product(
        "TEST_002",
        "Test Bank B",
        Country::Belgium,
        Currency::Usd,
        dec!(15000),
        ProductType::Note,
        RiskLevel::Low,
        "2024-08-16",
    ));
    collection
}

/// A larger, mixed collection: several issuers, repeated and tied totals,
/// optional coupons and three calendar months.
pub fn mixed_products() -> ProductCollection {
    let rows = [
        ("M01", "BNP Paribas", Country::France, Currency::Eur, dec!(50000), ProductType::Bond, RiskLevel::Low, "2024-08-15"),
        ("M02", "KBC Bank", Country::Belgium, Currency::Eur, dec!(20000), ProductType::Certificate, RiskLevel::High, "2024-08-30"),
        ("M03", "Société Générale", Country::France, Currency::Usd, dec!(30000), ProductType::Warrant, RiskLevel::VeryHigh, "2024-09-02"),
        ("M04", "BNP Paribas", Country::France, Currency::Gbp, dec!(10000), ProductType::Bond, RiskLevel::Medium, "2024-09-10"),
        ("M05", "Belfius Bank", Country::Belgium, Currency::Eur, dec!(30000), ProductType::Note, RiskLevel::Medium, "2024-09-11"),
        ("M06", "KBC Bank", Country::Belgium, Currency::Chf, dec!(10000), ProductType::Certificate, RiskLevel::High, "2024-10-01"),
        ("M07", "LCL", Country::France, Currency::Eur, dec!(5000), ProductType::Other, RiskLevel::VeryLow, "2024-10-05"),
        ("M08", "bnp paribas", Country::France, Currency::Eur, dec!(1000), ProductType::Bond, RiskLevel::Low, "2024-10-20"),
    ];

    let mut collection = ProductCollection::new();
    for (id, issuer, country, currency, value, product_type, risk, date) in rows {
        let mut p = product(id, issuer, country, currency, value, product_type, risk, date);
        match id {
            "M01" => p = product_with_coupon(p, dec!(3.5)),
            "M04" => p = product_with_coupon(p, dec!(4.5)),
            "M02" => p = product_with_coupon(p, dec!(6)),
            _ => {}
        }
        collection.add(p);
    }
    collection
}
