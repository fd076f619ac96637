use crate::error::IngestError;
use core_types::{ConversionOutcome, ProductCollection, RawProduct};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Anything that can deliver a batch of raw product records.
pub trait ProductSource {
    /// Short description used in logs.
    fn describe(&self) -> String;

    /// Fetches every raw record the source currently holds, in source order.
    fn fetch(&self) -> Result<Vec<RawProduct>, IngestError>;
}

/// The two accepted layouts of a product data file.
#[derive(Deserialize)]
#[serde(untagged)]
enum ProductFile {
    Wrapped { products: Vec<RawProduct> },
    Bare(Vec<RawProduct>),
}

/// Reads raw records from a JSON file holding either `{"products": [...]}`
/// or a bare array of records.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProductSource for FileSource {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    fn fetch(&self) -> Result<Vec<RawProduct>, IngestError> {
        let contents = fs::read_to_string(&self.path).map_err(|source| IngestError::Io {
            path: self.path.clone(),
            source,
        })?;

        let file: ProductFile = serde_json::from_str(&contents).map_err(|source| IngestError::Json {
            path: self.path.clone(),
            source,
        })?;

        let records = match file {
            ProductFile::Wrapped { products } => products,
            ProductFile::Bare(products) => products,
        };
        tracing::debug!(path = %self.path.display(), records = records.len(), "Product file read.");
        Ok(records)
    }
}

/// Fetches from `source` and converts the records into a collection.
///
/// Only a failure to read the source is an error. Individual invalid records
/// are skipped and listed in the outcome.
pub fn load_collection(source: &dyn ProductSource) -> Result<ConversionOutcome, IngestError> {
    tracing::info!(source = %source.describe(), "Loading SRP products.");
    let records = source.fetch()?;
    Ok(ProductCollection::from_raw(records))
}
