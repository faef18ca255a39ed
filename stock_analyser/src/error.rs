//! Error types for the stock_analyser crate

use market_data::DataError;
use thiserror::Error;

/// Errors surfaced to the user of the analyser
#[derive(Debug, Error)]
pub enum AnalyserError {
    /// A precondition on the user's input failed; the message is the notice to show
    #[error("{0}")]
    InvalidInput(String),

    /// Price data could not be loaded
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    /// The configuration file is unreadable
    #[error("Config error: {0}")]
    Config(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Chart export failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, AnalyserError>;
