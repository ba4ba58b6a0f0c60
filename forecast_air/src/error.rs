//! Error types for the forecast_air crate

use thiserror::Error;

/// Custom error types for the forecast_air crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Error from the data layer: fetch failures, invalid queries
    #[error("data error: {0}")]
    Data(#[from] air_data::AirDataError),

    /// Too few usable samples to attempt a forecast
    #[error("insufficient data: {found} usable samples, need at least {required}")]
    InsufficientData { found: usize, required: usize },

    /// Error from fitting or evaluating the forecasting model
    #[error("model error: {0}")]
    Model(String),

    /// Error from invalid parameters
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The headline baseline is zero and the percentage delta undefined
    #[error("current value is zero, percentage delta is undefined")]
    ZeroBaseline,

    /// Error from IO operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from CSV serialization
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;
