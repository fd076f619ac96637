//! # SRP Ingest
//!
//! Getting raw product records into the system: the `ProductSource`
//! abstraction, a JSON file source, and a sample data generator.
//!
//! ## Architectural Principles
//!
//! - **Sources deliver raw records only.** Validation belongs to `core-types`;
//!   `load_collection` hands the batch to `ProductCollection::from_raw`, so an
//!   invalid record is reported, never fatal.
//! - **Swappable sources.** Callers depend on the `ProductSource` trait, so a
//!   live feed can replace the file source without touching the pipeline.
//!
//! ## Public API
//!
//! - `ProductSource`, `FileSource`, `load_collection`: reading records.
//! - `SampleGenerator`, `write_sample_file`: producing test data files.
//! - `IngestError`: I/O and JSON failures.

pub mod error;
pub mod sample;
pub mod source;

pub use error::IngestError;
pub use sample::{SampleGenerator, write_sample_file};
pub use source::{FileSource, ProductSource, load_collection};
