use crate::enums::{Country, Currency, ProductType, RiskLevel};
use crate::error::ValidationError;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// Largest accepted nominal value (one quadrillion). Keeps every sum over a
/// collection far inside `Decimal`'s range.
pub const MAX_NOMINAL_VALUE: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// The typed input to [`Product::new`].
///
/// Enum membership is already guaranteed by the field types; the remaining
/// value constraints are checked when the product is built.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub id: String,
    pub name: String,
    pub issuer: String,
    pub country: Country,
    pub currency: Currency,
    pub issue_date: NaiveDate,
    pub maturity_date: Option<NaiveDate>,
    pub nominal_value: Decimal,
    pub coupon_rate: Option<Decimal>,
    pub product_type: ProductType,
    pub risk_level: RiskLevel,
    pub underlying_asset: Option<String>,
    pub rating: Option<String>,
    pub isin: Option<String>,
    pub cusip: Option<String>,
    pub min_investment: Option<Decimal>,
    pub max_investment: Option<Decimal>,
    pub liquidity: Option<String>,
    pub fees: Option<Decimal>,
}

impl NewProduct {
    /// A draft holding only the required attributes.
    #[allow(clippy::too_many_arguments)]
    pub fn required(
        id: impl Into<String>,
        name: impl Into<String>,
        issuer: impl Into<String>,
        country: Country,
        currency: Currency,
        issue_date: NaiveDate,
        nominal_value: Decimal,
        product_type: ProductType,
        risk_level: RiskLevel,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            issuer: issuer.into(),
            country,
            currency,
            issue_date,
            maturity_date: None,
            nominal_value,
            coupon_rate: None,
            product_type,
            risk_level,
            underlying_asset: None,
            rating: None,
            isin: None,
            cusip: None,
            min_investment: None,
            max_investment: None,
            liquidity: None,
            fees: None,
        }
    }
}

/// One validated structured retail product.
///
/// Fields are private: a `Product` can only be obtained through validation,
/// and after that only its audit timestamps can change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    id: String,
    name: String,
    issuer: String,
    country: Country,
    currency: Currency,
    issue_date: NaiveDate,
    maturity_date: Option<NaiveDate>,
    #[serde(with = "rust_decimal::serde::float")]
    nominal_value: Decimal,
    #[serde(with = "rust_decimal::serde::float_option")]
    coupon_rate: Option<Decimal>,
    product_type: ProductType,
    risk_level: RiskLevel,
    underlying_asset: Option<String>,
    rating: Option<String>,
    isin: Option<String>,
    cusip: Option<String>,
    #[serde(with = "rust_decimal::serde::float_option")]
    min_investment: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    max_investment: Option<Decimal>,
    liquidity: Option<String>,
    #[serde(with = "rust_decimal::serde::float_option")]
    fees: Option<Decimal>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Product {
    /// Validates a draft and stamps both audit timestamps with the current time.
    pub fn new(draft: NewProduct) -> Result<Self, ValidationError> {
        require_text("id", &draft.id)?;
        require_text("name", &draft.name)?;
        require_text("issuer", &draft.issuer)?;
        check_nominal_value(draft.nominal_value)?;
        if let Some(rate) = draft.coupon_rate {
            check_coupon_rate(rate)?;
        }
        if let Some(maturity) = draft.maturity_date {
            check_maturity(draft.issue_date, maturity)?;
        }

        let now = Utc::now();
        Ok(Self {
            id: draft.id,
            name: draft.name,
            issuer: draft.issuer,
            country: draft.country,
            currency: draft.currency,
            issue_date: draft.issue_date,
            maturity_date: draft.maturity_date,
            nominal_value: draft.nominal_value,
            coupon_rate: draft.coupon_rate,
            product_type: draft.product_type,
            risk_level: draft.risk_level,
            underlying_asset: draft.underlying_asset,
            rating: draft.rating,
            isin: draft.isin,
            cusip: draft.cusip,
            min_investment: draft.min_investment,
            max_investment: draft.max_investment,
            liquidity: draft.liquidity,
            fees: draft.fees,
            created_at: now,
            updated_at: now,
        })
    }

    /// Records that the product was seen again by refreshing `updated_at`.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn country(&self) -> Country {
        self.country
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn issue_date(&self) -> NaiveDate {
        self.issue_date
    }

    pub fn maturity_date(&self) -> Option<NaiveDate> {
        self.maturity_date
    }

    pub fn nominal_value(&self) -> Decimal {
        self.nominal_value
    }

    /// Annual coupon in percent, when the product pays one.
    pub fn coupon_rate(&self) -> Option<Decimal> {
        self.coupon_rate
    }

    pub fn product_type(&self) -> ProductType {
        self.product_type
    }

    pub fn risk_level(&self) -> RiskLevel {
        self.risk_level
    }

    pub fn underlying_asset(&self) -> Option<&str> {
        self.underlying_asset.as_deref()
    }

    pub fn rating(&self) -> Option<&str> {
        self.rating.as_deref()
    }

    pub fn isin(&self) -> Option<&str> {
        self.isin.as_deref()
    }

    pub fn cusip(&self) -> Option<&str> {
        self.cusip.as_deref()
    }

    pub fn min_investment(&self) -> Option<Decimal> {
        self.min_investment
    }

    pub fn max_investment(&self) -> Option<Decimal> {
        self.max_investment
    }

    pub fn liquidity(&self) -> Option<&str> {
        self.liquidity.as_deref()
    }

    /// Fees in percent.
    pub fn fees(&self) -> Option<Decimal> {
        self.fees
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl TryFrom<NewProduct> for Product {
    type Error = ValidationError;

    fn try_from(draft: NewProduct) -> Result<Self, Self::Error> {
        Product::new(draft)
    }
}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(())
}

pub(crate) fn check_nominal_value(value: Decimal) -> Result<(), ValidationError> {
    if value <= Decimal::ZERO {
        return Err(ValidationError::NotPositive {
            field: "nominal_value",
            value,
        });
    }
    if value > MAX_NOMINAL_VALUE {
        return Err(ValidationError::TooLarge {
            field: "nominal_value",
            value,
            max: MAX_NOMINAL_VALUE,
        });
    }
    Ok(())
}

pub(crate) fn check_coupon_rate(rate: Decimal) -> Result<(), ValidationError> {
    if rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED {
        return Err(ValidationError::OutOfRange {
            field: "coupon_rate",
            value: rate,
        });
    }
    Ok(())
}

pub(crate) fn check_maturity(issue: NaiveDate, maturity: NaiveDate) -> Result<(), ValidationError> {
    if maturity <= issue {
        return Err(ValidationError::MaturityNotAfterIssue { issue, maturity });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn draft() -> NewProduct {
        NewProduct::required(
            "TEST_001",
            "Test Product",
            "Test Bank",
            Country::France,
            Currency::Eur,
            NaiveDate::from_ymd_opt(2024, 8, 15).unwrap(),
            dec!(10000),
            ProductType::Bond,
            RiskLevel::Medium,
        )
    }

    #[test]
    fn builds_a_valid_product() {
        let product = Product::new(draft()).unwrap();
        assert_eq!(product.id(), "TEST_001");
        assert_eq!(product.country(), Country::France);
        assert_eq!(product.currency(), Currency::Eur);
        assert_eq!(product.nominal_value(), dec!(10000));
        assert_eq!(product.created_at(), product.updated_at());
    }

    #[test]
    fn rejects_non_positive_nominal_value() {
        for value in [dec!(-1000), dec!(0)] {
            let mut d = draft();
            d.nominal_value = value;
            let err = Product::new(d).unwrap_err();
            assert_eq!(err.field(), "nominal_value");
        }
    }

    #[test]
    fn nominal_value_is_capped() {
        assert_eq!(MAX_NOMINAL_VALUE, dec!(1000000000000000));

        let mut d = draft();
        d.nominal_value = MAX_NOMINAL_VALUE;
        assert!(Product::new(d).is_ok());

        let mut d = draft();
        d.nominal_value = dec!(40000000000000000000000000000);
        let err = Product::new(d).unwrap_err();
        assert!(matches!(err, ValidationError::TooLarge { field: "nominal_value", .. }));
    }

    #[test]
    fn coupon_rate_bounds_are_inclusive() {
        for rate in [dec!(0), dec!(100), dec!(4.25)] {
            let mut d = draft();
            d.coupon_rate = Some(rate);
            assert!(Product::new(d).is_ok(), "rate {rate} should be accepted");
        }
        for rate in [dec!(-0.01), dec!(100.01)] {
            let mut d = draft();
            d.coupon_rate = Some(rate);
            assert_eq!(Product::new(d).unwrap_err().field(), "coupon_rate");
        }
    }

    #[test]
    fn maturity_must_be_strictly_after_issue() {
        let mut d = draft();
        d.maturity_date = Some(d.issue_date);
        assert!(matches!(
            Product::new(d).unwrap_err(),
            ValidationError::MaturityNotAfterIssue { .. }
        ));

        let mut d = draft();
        d.maturity_date = d.issue_date.succ_opt();
        assert!(Product::new(d).is_ok());
    }

    #[test]
    fn blank_text_fields_are_rejected() {
        let mut d = draft();
        d.issuer = "   ".to_string();
        assert_eq!(
            Product::new(d).unwrap_err(),
            ValidationError::Empty { field: "issuer" }
        );
    }

    #[test]
    fn touch_only_moves_updated_at() {
        let mut product = Product::new(draft()).unwrap();
        let created = product.created_at();
        product.touch();
        assert_eq!(product.created_at(), created);
        assert!(product.updated_at() >= created);
    }
}
