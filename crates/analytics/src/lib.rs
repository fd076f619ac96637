//! # SRP Analytics Engine
//!
//! This crate turns a validated `ProductCollection` into aggregate statistics:
//! grouped breakdowns by country, currency, risk level and product type, an
//! issuer ranking and a month-by-month evolution.
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** no I/O. It depends only on `core-types` for the product
//!   model and on `configuration` for the ranking limits.
//! - **Stateless calculation:** the `AnalyticsEngine` takes a collection as
//!   input and produces an `AggregationResult` as output. Results are never
//!   patched; a changed collection means a new analysis.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: grouping, ranking, filtering and summary logic.
//! - `AggregationResult`: the snapshot of all computed statistics.
//! - `ProductFilter`: conjunction of optional product predicates.
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
mod accumulator;
pub mod engine;
pub mod error;
pub mod filter;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use filter::ProductFilter;
pub use report::{
    AggregationResult, CollectionSummary, CountryBreakdown, CurrencyBreakdown, IssuerCount,
    IssuerStats, MonthKey, MonthlyStats, PartitionStats, ProductTypeBreakdown, RiskLevelBreakdown,
};
