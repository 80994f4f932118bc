//! Error types for the commodity_forecast crate

use forecast_math::MathError;
use thiserror::Error;

/// Message shown when a series is too short to forecast
pub const INSUFFICIENT_DATA_MESSAGE: &str = "Insufficient historical data for AI forecasting.";

/// Custom error types for the commodity_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// The series has fewer observations than the engine requires
    #[error("Insufficient historical data for AI forecasting. Need at least {required} observations, got {actual}.")]
    InsufficientData { required: usize, actual: usize },

    /// An observation could not be parsed or carries an impossible price
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error raised while fitting or evaluating a regressor
    #[error("Model error: {0}")]
    Model(#[from] MathError),

    /// Error from IO operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from CSV decoding
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error from JSON encoding or decoding
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ForecastError {
    /// Whether this error is the recoverable insufficient-data case
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, ForecastError::InsufficientData { .. })
    }
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;
