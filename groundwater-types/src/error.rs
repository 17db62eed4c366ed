//! Error types for dataset loading and validation.

use thiserror::Error;

use crate::SchemaVersion;

/// Errors that can occur when reading or validating a dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Reading the dataset failed.
    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    /// The dataset is not valid JSON or does not match the schema.
    #[cfg(feature = "serde")]
    #[error("Failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),

    /// The dataset was written with an incompatible schema.
    #[error("Unsupported dataset version {found} (expected {expected})")]
    UnsupportedVersion {
        found: SchemaVersion,
        expected: SchemaVersion,
    },

    /// A point lies outside the valid latitude/longitude domain.
    #[error("Point {id} has invalid coordinates ({latitude}, {longitude})")]
    InvalidCoordinate {
        id: String,
        latitude: f64,
        longitude: f64,
    },

    /// A measurement that must be finite is NaN or infinite.
    #[error("Point {id} has a non-finite {field}")]
    NonFiniteMeasurement { id: String, field: &'static str },

    /// A measurement falls outside its 0-100 scale.
    #[error("Point {id} has {field} {value} outside 0-100")]
    MeasurementOutOfRange {
        id: String,
        field: &'static str,
        value: f64,
    },

    /// Two points share the same identifier.
    #[error("Duplicate point id: {0}")]
    DuplicateId(String),
}
