//! Error types for tuning data loading.

use thiserror::Error;

/// Errors that can occur when loading or validating `tower_fire.ron`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    Read { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    Parse { path: String, details: String },

    /// A min/max pair is inverted.
    #[error("Invalid range for {field}: min {min} is greater than max {max}")]
    InvalidRange {
        field: &'static str,
        min: f32,
        max: f32,
    },

    /// NaN or infinite.
    #[error("Value for {field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },

    /// A duration, interval or amount that must not be negative.
    #[error("Negative value for {field}: {value}")]
    Negative { field: &'static str, value: f32 },
}
