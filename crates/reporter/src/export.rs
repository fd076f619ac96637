use crate::document::ReportDocument;
use crate::error::ReportError;
use crate::html::render_html;
use analytics::AggregationResult;
use core_types::ProductCollection;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Destinations of the three exports written after an analysis.
#[derive(Debug, Clone)]
pub struct ExportPaths {
    pub products: PathBuf,
    pub analysis: PathBuf,
    pub report: PathBuf,
}

/// Attempts every export, even after one fails.
///
/// Returns the failed destinations with their errors, in write order.
pub fn write_all(
    paths: &ExportPaths,
    collection: &ProductCollection,
    result: &AggregationResult,
    doc: &ReportDocument,
) -> Vec<(PathBuf, ReportError)> {
    let outcomes = [
        (&paths.products, write_products_json(&paths.products, collection)),
        (&paths.analysis, write_analysis_json(&paths.analysis, result)),
        (&paths.report, write_report_html(&paths.report, &render_html(doc))),
    ];

    outcomes
        .into_iter()
        .filter_map(|(path, outcome)| outcome.err().map(|e| (path.clone(), e)))
        .inspect(|(path, e)| tracing::error!(path = %path.display(), error = %e, "Export failed."))
        .collect()
}

/// Writes the product collection as pretty-printed JSON.
pub fn write_products_json(path: &Path, collection: &ProductCollection) -> Result<(), ReportError> {
    write_json(path, collection)?;
    tracing::info!(path = %path.display(), products = collection.len(), "Products exported.");
    Ok(())
}

/// Writes the aggregation result as pretty-printed JSON.
pub fn write_analysis_json(path: &Path, result: &AggregationResult) -> Result<(), ReportError> {
    write_json(path, result)?;
    tracing::info!(path = %path.display(), "Analysis exported.");
    Ok(())
}

/// Writes an already rendered HTML report.
pub fn write_report_html(path: &Path, html: &str) -> Result<(), ReportError> {
    write_file(path, html.as_bytes())?;
    tracing::info!(path = %path.display(), size = html.len(), "HTML report written.");
    Ok(())
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), ReportError> {
    let json = serde_json::to_string_pretty(value)?;
    write_file(path, json.as_bytes())
}

/// Writes `contents` to `path`, creating missing parent directories first.
fn write_file(path: &Path, contents: &[u8]) -> Result<(), ReportError> {
    let io_error = |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    fs::write(path, contents).map_err(io_error)
}
