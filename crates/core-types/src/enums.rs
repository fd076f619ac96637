use crate::error::ParseEnumError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Countries in which products are distributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Country {
    #[serde(rename = "FR")]
    France,
    #[serde(rename = "BE")]
    Belgium,
}

impl Country {
    pub const ALL: [Country; 2] = [Country::France, Country::Belgium];

    /// The ISO 3166 alpha-2 code used on the wire.
    pub fn code(&self) -> &'static str {
        match self {
            Country::France => "FR",
            Country::Belgium => "BE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "EUR")]
    Eur,
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "GBP")]
    Gbp,
    #[serde(rename = "CHF")]
    Chf,
    #[serde(rename = "JPY")]
    Jpy,
}

impl Currency {
    pub const ALL: [Currency; 5] = [
        Currency::Eur,
        Currency::Usd,
        Currency::Gbp,
        Currency::Chf,
        Currency::Jpy,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
            Currency::Gbp => "GBP",
            Currency::Chf => "CHF",
            Currency::Jpy => "JPY",
        }
    }
}

/// The legal form of a structured product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    Bond,
    Note,
    Certificate,
    Warrant,
    Option,
    Future,
    Swap,
    Other,
}

impl ProductType {
    pub const ALL: [ProductType; 8] = [
        ProductType::Bond,
        ProductType::Note,
        ProductType::Certificate,
        ProductType::Warrant,
        ProductType::Option,
        ProductType::Future,
        ProductType::Swap,
        ProductType::Other,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            ProductType::Bond => "bond",
            ProductType::Note => "note",
            ProductType::Certificate => "certificate",
            ProductType::Warrant => "warrant",
            ProductType::Option => "option",
            ProductType::Future => "future",
            ProductType::Swap => "swap",
            ProductType::Other => "other",
        }
    }
}

/// Risk scale from 1 (lowest) to 5 (highest).
///
/// The derived `Ord` follows the scale, so `VeryLow < VeryHigh`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "1")]
    VeryLow,
    #[serde(rename = "2")]
    Low,
    #[serde(rename = "3")]
    Medium,
    #[serde(rename = "4")]
    High,
    #[serde(rename = "5")]
    VeryHigh,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 5] = [
        RiskLevel::VeryLow,
        RiskLevel::Low,
        RiskLevel::Medium,
        RiskLevel::High,
        RiskLevel::VeryHigh,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            RiskLevel::VeryLow => "1",
            RiskLevel::Low => "2",
            RiskLevel::Medium => "3",
            RiskLevel::High => "4",
            RiskLevel::VeryHigh => "5",
        }
    }

    /// Numeric position on the 1..=5 scale.
    pub fn score(&self) -> u8 {
        *self as u8 + 1
    }

    /// Human-readable label for reports.
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::VeryLow => "Very low",
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::VeryHigh => "Very high",
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Country {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.code() == s)
            .ok_or_else(|| ParseEnumError::new("country", s))
    }
}

impl FromStr for Currency {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.code() == s)
            .ok_or_else(|| ParseEnumError::new("currency", s))
    }
}

impl FromStr for ProductType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.code() == s)
            .ok_or_else(|| ParseEnumError::new("product type", s))
    }
}

impl FromStr for RiskLevel {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.code() == s)
            .ok_or_else(|| ParseEnumError::new("risk level", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_from_str() {
        for c in Country::ALL {
            assert_eq!(c.code().parse::<Country>().unwrap(), c);
        }
        for t in ProductType::ALL {
            assert_eq!(t.to_string().parse::<ProductType>().unwrap(), t);
        }
    }

    #[test]
    fn unknown_codes_are_rejected() {
        assert!("DE".parse::<Country>().is_err());
        assert!("eur".parse::<Currency>().is_err());
        assert!("6".parse::<RiskLevel>().is_err());
        let err = "structured".parse::<ProductType>().unwrap_err();
        assert_eq!(err.to_string(), "unknown product type 'structured'");
    }

    #[test]
    fn risk_levels_are_ordered_lowest_first() {
        assert!(RiskLevel::VeryLow < RiskLevel::Medium);
        assert!(RiskLevel::High < RiskLevel::VeryHigh);
        assert_eq!(RiskLevel::Medium.score(), 3);
        assert_eq!(RiskLevel::VeryHigh.label(), "Very high");
    }

    #[test]
    fn serde_uses_wire_codes() {
        assert_eq!(serde_json::to_string(&Country::Belgium).unwrap(), "\"BE\"");
        assert_eq!(serde_json::to_string(&ProductType::Certificate).unwrap(), "\"certificate\"");
        let risk: RiskLevel = serde_json::from_str("\"2\"").unwrap();
        assert_eq!(risk, RiskLevel::Low);
    }
}
