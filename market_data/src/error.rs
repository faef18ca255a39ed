//! Error types for the market_data crate

use thiserror::Error;

/// Errors raised while loading or downloading price data
#[derive(Debug, Error)]
pub enum DataError {
    /// Error from IO operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV input
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the expected JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required column is absent from the input
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// A value could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// The data provider reported an error
    #[error("API error [{code}]: {description}")]
    Api { code: String, description: String },

    /// The request succeeded but returned no rows
    #[error("No data returned")]
    NoData,

    /// The data provider does not know the ticker
    #[error("Unknown ticker: {0}")]
    UnknownTicker(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, DataError>;
