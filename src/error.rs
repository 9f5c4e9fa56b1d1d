use thiserror::Error;

/// Errors raised by the measurement data model.
///
/// Malformed samples are never reported here: they are recovered locally
/// by the value parser. Empty statistics are not errors either.
#[derive(Error, Debug)]
pub enum MeasurementError {
    /// Extrema were requested on a series that holds no values
    #[error("Measurement {name} has no values")]
    EmptySeries { name: String },

    /// Extrema were requested but no value carries a parseable timestamp
    #[error("Measurement {name} has no valid timestamps")]
    MissingTimestamps { name: String },

    #[error("Unknown period: {0}")]
    UnknownPeriod(String),

    #[error("Unknown granularity: {0}")]
    UnknownGranularity(String),

    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    #[error("Unknown measurement category: {0}")]
    UnknownCategory(String),

    /// Unknown metric name, only raised when decoding in strict mode
    #[error("Unknown measurement type: {0}")]
    UnknownMeasurementType(String),

    /// Registry integrity issue, the same identifier is declared twice
    #[error("Duplicate measurement type {identifier} declared at {first} and {second}")]
    DuplicateIdentifier {
        identifier: String,
        first: String,
        second: String,
    },

    /// The measurements document could not be decoded at all
    #[error("Invalid measurements payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

impl MeasurementError {
    pub fn empty_series(name: &str) -> Self {
        MeasurementError::EmptySeries {
            name: name.to_string(),
        }
    }

    pub fn missing_timestamps(name: &str) -> Self {
        MeasurementError::MissingTimestamps {
            name: name.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MeasurementError>;
