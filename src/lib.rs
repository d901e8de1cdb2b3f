// Crate root library declaration and module exports.
pub mod cli;
pub mod config;
pub mod context;
pub mod controller;
pub mod error;
pub mod model;
pub mod resolution;
pub mod validate;

pub use controller::{AbortedField, AddExtraction, EditExtraction, ExtractionReport, Extractor};
pub use error::{DateError, ExtractionError};
