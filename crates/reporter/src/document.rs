use crate::format::{format_amount, format_count, format_rate};
use analytics::{AggregationResult, IssuerCount, PartitionStats};
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::fmt::Display;

pub const REPORT_TITLE: &str = "SRP Products Analysis Report";

/// Placeholder shown in place of a section with nothing to display.
pub const NO_DATA: &str = "No data available";

/// A renderer-independent view of an `AggregationResult`.
///
/// Building the document only reads and formats values already present in the
/// result; nothing is recomputed. Renderers then decide how each part looks.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub overview: Vec<Metric>,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: &'static str,
    pub content: SectionContent,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SectionContent {
    /// One group of figures per breakdown key.
    Groups(Vec<Group>),
    Table(Table),
}

/// The figures of one breakdown key, e.g. a single country.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub heading: String,
    pub metrics: Vec<Metric>,
    /// Free-form lines such as the distinct currencies or the top issuers.
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl Section {
    pub fn is_empty(&self) -> bool {
        match &self.content {
            SectionContent::Groups(groups) => groups.is_empty(),
            SectionContent::Table(table) => table.rows.is_empty(),
        }
    }
}

impl ReportDocument {
    /// Lays out `result` as a report generated at `generated_at`.
    ///
    /// Every breakdown gets a section even when it is empty, so the structure
    /// of the report does not depend on the data.
    pub fn build(result: &AggregationResult, generated_at: DateTime<Utc>) -> Self {
        let sections = vec![
            country_section(result),
            currency_section(result),
            risk_level_section(result),
            product_type_section(result),
            monthly_section(result),
            issuer_section(result),
        ];

        Self {
            title: REPORT_TITLE.to_string(),
            generated_at,
            overview: vec![
                metric("Total products", format_count(result.total_products)),
                metric("Total value", format_amount(result.total_value)),
                metric("Average value", format_amount(result.average_nominal_value)),
            ],
            sections,
        }
    }

    /// The generation timestamp as shown in the report header.
    pub fn generated_label(&self) -> String {
        self.generated_at.format("%d/%m/%Y %H:%M UTC").to_string()
    }
}

fn metric(label: &'static str, value: String) -> Metric {
    Metric { label, value }
}

fn partition_metrics(stats: &PartitionStats) -> Vec<Metric> {
    vec![
        metric("Products", format_count(stats.count)),
        metric("Total value", format_amount(stats.total_value)),
        metric("Average value", format_amount(stats.average_value)),
    ]
}

fn join<T: Display>(values: &BTreeSet<T>) -> String {
    values.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

fn issuer_note(issuers: &[IssuerCount]) -> String {
    let listed: Vec<String> = issuers
        .iter()
        .map(|i| format!("{} ({})", i.issuer, i.count))
        .collect();
    format!("Top issuers: {}", listed.join(", "))
}

fn risk_note(stats: &PartitionStats) -> String {
    let listed: Vec<String> = stats
        .risk_distribution
        .iter()
        .map(|(level, count)| format!("{level}: {count}"))
        .collect();
    format!("Risk levels: {}", listed.join(", "))
}

fn country_section(result: &AggregationResult) -> Section {
    let groups = result
        .by_country
        .iter()
        .map(|(country, breakdown)| Group {
            heading: country.to_string(),
            metrics: partition_metrics(&breakdown.stats),
            notes: vec![
                format!("Currencies: {}", join(&breakdown.currencies)),
                format!("Product types: {}", join(&breakdown.product_types)),
                risk_note(&breakdown.stats),
                issuer_note(&breakdown.top_issuers),
            ],
        })
        .collect();

    Section {
        title: "Breakdown by country",
        content: SectionContent::Groups(groups),
    }
}

fn currency_section(result: &AggregationResult) -> Section {
    let groups = result
        .by_currency
        .iter()
        .map(|(currency, breakdown)| Group {
            heading: currency.to_string(),
            metrics: partition_metrics(&breakdown.stats),
            notes: vec![
                format!("Countries: {}", join(&breakdown.countries)),
                format!("Product types: {}", join(&breakdown.product_types)),
            ],
        })
        .collect();

    Section {
        title: "Breakdown by currency",
        content: SectionContent::Groups(groups),
    }
}

fn risk_level_section(result: &AggregationResult) -> Section {
    let groups = result
        .by_risk_level
        .iter()
        .map(|(level, breakdown)| Group {
            heading: format!("Level {} - {}", level.code(), level.label()),
            metrics: partition_metrics(&breakdown.stats),
            notes: vec![
                format!("Countries: {}", join(&breakdown.countries)),
                format!("Currencies: {}", join(&breakdown.currencies)),
                issuer_note(&breakdown.top_issuers),
            ],
        })
        .collect();

    Section {
        title: "Breakdown by risk level",
        content: SectionContent::Groups(groups),
    }
}

fn product_type_section(result: &AggregationResult) -> Section {
    let groups = result
        .by_product_type
        .iter()
        .map(|(product_type, breakdown)| {
            let mut metrics = partition_metrics(&breakdown.stats);
            let coupon = breakdown
                .average_coupon
                .map(format_rate)
                .unwrap_or_else(|| "n/a".to_string());
            metrics.push(metric("Average coupon", coupon));

            Group {
                heading: product_type.to_string(),
                metrics,
                notes: vec![
                    format!("Countries: {}", join(&breakdown.countries)),
                    format!("Currencies: {}", join(&breakdown.currencies)),
                ],
            }
        })
        .collect();

    Section {
        title: "Breakdown by product type",
        content: SectionContent::Groups(groups),
    }
}

fn monthly_section(result: &AggregationResult) -> Section {
    let rows = result
        .monthly_evolution
        .iter()
        .map(|(month, stats)| {
            vec![
                month.to_string(),
                format_count(stats.count),
                format_amount(stats.total_value),
                format_amount(stats.average_value),
                join(&stats.countries),
                join(&stats.currencies),
            ]
        })
        .collect();

    Section {
        title: "Monthly evolution",
        content: SectionContent::Table(Table {
            headers: vec!["Month", "Products", "Total value", "Average value", "Countries", "Currencies"],
            rows,
        }),
    }
}

fn issuer_section(result: &AggregationResult) -> Section {
    let rows = result
        .top_issuers
        .iter()
        .enumerate()
        .map(|(rank, issuer)| {
            vec![
                (rank + 1).to_string(),
                issuer.issuer.clone(),
                format_count(issuer.count),
                format_amount(issuer.total_value),
                format_amount(issuer.average_value),
            ]
        })
        .collect();

    Section {
        title: "Top issuers",
        content: SectionContent::Table(Table {
            headers: vec!["#", "Issuer", "Products", "Total value", "Average value"],
            rows,
        }),
    }
}
