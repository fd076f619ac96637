use crate::enums::{Country, Currency, ProductType, RiskLevel};
use crate::error::ValidationError;
use crate::product::{self, NewProduct, Product};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// A product record as delivered by an ingestion source, before validation.
///
/// Every field is kept as a loose JSON value so that a single malformed record
/// never prevents the rest of a batch from being read. Numbers may be JSON
/// numbers or numeric strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawProduct {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maturity_date: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nominal_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon_rate: Option<Value>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<Value>,
    #[serde(rename = "underlying", default, skip_serializing_if = "Option::is_none")]
    pub underlying_asset: Option<Value>,
    #[serde(rename = "risk", default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isin: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cusip: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_investment: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_investment: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liquidity: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fees: Option<Value>,
}

impl RawProduct {
    /// The record's identifier as text, if it has one. Used when reporting errors.
    pub fn id_text(&self) -> Option<String> {
        text(&self.id)
    }

    /// Converts the record into a typed draft, stopping at the first bad field.
    pub fn to_draft(&self) -> Result<NewProduct, ValidationError> {
        Ok(NewProduct {
            id: required_text("id", &self.id)?,
            name: required_text("name", &self.name)?,
            issuer: required_text("issuer", &self.issuer)?,
            country: required_enum("country", &self.country)?,
            currency: required_enum("currency", &self.currency)?,
            issue_date: required_date("issue_date", &self.issue_date)?,
            maturity_date: optional_date("maturity_date", &self.maturity_date)?,
            nominal_value: required_decimal("nominal_value", &self.nominal_value)?,
            coupon_rate: optional_decimal("coupon_rate", &self.coupon_rate)?,
            product_type: required_enum("type", &self.product_type)?,
            risk_level: required_enum("risk", &self.risk_level)?,
            underlying_asset: text(&self.underlying_asset),
            rating: text(&self.rating),
            isin: text(&self.isin),
            cusip: text(&self.cusip),
            min_investment: optional_decimal("min_investment", &self.min_investment)?,
            max_investment: optional_decimal("max_investment", &self.max_investment)?,
            liquidity: text(&self.liquidity),
            fees: optional_decimal("fees", &self.fees)?,
        })
    }

    /// Lists every violation in the record instead of only the first one.
    ///
    /// An empty list means `Product::try_from` will succeed.
    pub fn problems(&self) -> Vec<ValidationError> {
        let mut problems = Vec::new();

        for (field, value) in [("id", &self.id), ("name", &self.name), ("issuer", &self.issuer)] {
            keep(&mut problems, required_text(field, value));
        }
        keep(&mut problems, required_enum::<Country>("country", &self.country));
        keep(&mut problems, required_enum::<Currency>("currency", &self.currency));
        keep(&mut problems, required_enum::<ProductType>("type", &self.product_type));
        keep(&mut problems, required_enum::<RiskLevel>("risk", &self.risk_level));

        if let Some(value) = keep(&mut problems, required_decimal("nominal_value", &self.nominal_value)) {
            keep(&mut problems, product::check_nominal_value(value));
        }
        if let Some(Some(rate)) = keep(&mut problems, optional_decimal("coupon_rate", &self.coupon_rate)) {
            keep(&mut problems, product::check_coupon_rate(rate));
        }

        let issue = keep(&mut problems, required_date("issue_date", &self.issue_date));
        let maturity = keep(&mut problems, optional_date("maturity_date", &self.maturity_date));
        if let (Some(issue), Some(Some(maturity))) = (issue, maturity) {
            keep(&mut problems, product::check_maturity(issue, maturity));
        }

        for (field, value) in [
            ("min_investment", &self.min_investment),
            ("max_investment", &self.max_investment),
            ("fees", &self.fees),
        ] {
            keep(&mut problems, optional_decimal(field, value));
        }

        problems
    }
}

impl TryFrom<RawProduct> for Product {
    type Error = ValidationError;

    fn try_from(raw: RawProduct) -> Result<Self, Self::Error> {
        Product::new(raw.to_draft()?)
    }
}

impl TryFrom<&RawProduct> for Product {
    type Error = ValidationError;

    fn try_from(raw: &RawProduct) -> Result<Self, Self::Error> {
        Product::new(raw.to_draft()?)
    }
}

fn keep<T>(problems: &mut Vec<ValidationError>, result: Result<T, ValidationError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            problems.push(err);
            None
        }
    }
}

/// Reads a value as text. Null and blank strings count as absent.
fn text(value: &Option<Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}

fn required_text(field: &'static str, value: &Option<Value>) -> Result<String, ValidationError> {
    match value {
        None | Some(Value::Null) => Err(ValidationError::Missing { field }),
        Some(Value::String(s)) => {
            product::require_text(field, s)?;
            Ok(s.clone())
        }
        Some(other) => Ok(other.to_string()),
    }
}

fn required_enum<T>(field: &'static str, value: &Option<Value>) -> Result<T, ValidationError>
where
    T: FromStr<Err = crate::error::ParseEnumError>,
{
    let raw = text(value).ok_or(ValidationError::Missing { field })?;
    raw.trim()
        .parse::<T>()
        .map_err(|source| ValidationError::UnknownVariant { field, source })
}

fn parse_date(field: &'static str, raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate {
        field,
        value: raw.to_string(),
    })
}

fn required_date(field: &'static str, value: &Option<Value>) -> Result<NaiveDate, ValidationError> {
    let raw = text(value).ok_or(ValidationError::Missing { field })?;
    parse_date(field, &raw)
}

fn optional_date(field: &'static str, value: &Option<Value>) -> Result<Option<NaiveDate>, ValidationError> {
    text(value).map(|raw| parse_date(field, &raw)).transpose()
}

fn parse_decimal(field: &'static str, raw: &str) -> Result<Decimal, ValidationError> {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| ValidationError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}

fn optional_decimal(field: &'static str, value: &Option<Value>) -> Result<Option<Decimal>, ValidationError> {
    match value {
        Some(Value::Number(n)) => parse_decimal(field, &n.to_string()).map(Some),
        Some(Value::Bool(_)) | Some(Value::Array(_)) | Some(Value::Object(_)) => {
            Err(ValidationError::InvalidNumber {
                field,
                value: value.as_ref().map(Value::to_string).unwrap_or_default(),
            })
        }
        _ => text(value).map(|raw| parse_decimal(field, &raw)).transpose(),
    }
}

fn required_decimal(field: &'static str, value: &Option<Value>) -> Result<Decimal, ValidationError> {
    optional_decimal(field, value)?.ok_or(ValidationError::Missing { field })
}
