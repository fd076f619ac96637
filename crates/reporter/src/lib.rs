//! # SRP Reporter
//!
//! Presentation layer for analysis results: a renderer-independent
//! `ReportDocument`, HTML and terminal renderers, and the JSON/HTML file
//! exports.
//!
//! ## Architectural Principles
//!
//! - **No recomputation:** the document is built from an `AggregationResult`
//!   alone. Every figure shown is a value already present in the result.
//! - **Failures leave data intact:** an export error is returned to the
//!   caller; the result it was writing stays valid and can be written again.
//!
//! ## Public API
//!
//! - `ReportDocument`: sections, metrics and tables laid out for rendering.
//! - `render_html` / `render_text`: the two renderers, plus `render_products`
//!   for product listings.
//! - `write_products_json`, `write_analysis_json`, `write_report_html`: exports,
//!   and `write_all` to attempt all three and collect the failures.
//! - `ReportError`: the error type returned by the exports.

pub mod document;
pub mod error;
pub mod export;
pub mod format;
pub mod html;
pub mod text;

pub use document::{NO_DATA, ReportDocument, Section, SectionContent};
pub use error::ReportError;
pub use export::{ExportPaths, write_all, write_analysis_json, write_products_json, write_report_html};
pub use format::{format_amount, format_count, format_rate};
pub use html::render_html;
pub use text::{render_products, render_text};
