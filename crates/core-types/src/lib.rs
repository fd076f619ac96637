//! # SRP Core Types
//!
//! The typed product model shared by every other crate in the workspace:
//! the closed domain enumerations, the validated `Product` record, the raw
//! record shape delivered by ingestion sources, and the append-only
//! `ProductCollection`.

pub mod collection;
pub mod enums;
pub mod error;
pub mod product;
pub mod raw;

// Re-export the core types to provide a clean public API.
pub use collection::{ConversionOutcome, DateRange, ProductCollection};
pub use enums::{Country, Currency, ProductType, RiskLevel};
pub use error::{ParseEnumError, RecordError, ValidationError};
pub use product::{MAX_NOMINAL_VALUE, NewProduct, Product};
pub use raw::RawProduct;
