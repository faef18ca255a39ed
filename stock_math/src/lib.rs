//! # Stock Math
//!
//! Numeric core of the stock analyser. Everything in this crate is a pure
//! function of an in-memory, chronologically ordered series of closing prices:
//!
//! - [`moving_averages`]: simple, weighted and exponential moving averages
//! - [`indicators`]: the fixed indicator set (50/200 SMA, 10 WMA, MACD 12/26/9)
//! - [`trend`]: least-squares trend line and its extrapolation
//! - [`statistics`]: descriptive summary of closing prices

use thiserror::Error;

pub mod indicators;
pub mod moving_averages;
pub mod statistics;
pub mod trend;

pub use indicators::{compute_indicators, Indicator, IndicatorColumns};
pub use statistics::ClosingPriceSummary;
pub use trend::{fit_linear_trend, predict_series, predict_value, LinearFit, TrendFit};

/// Errors that can occur in the streaming indicator calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for stock math operations
pub type Result<T> = std::result::Result<T, MathError>;

/// Round `value` to `decimals` places, ties to even.
///
/// Scales by `10^decimals` before rounding, which is how numeric array
/// libraries round, so `round_to(0.125, 2) == 0.12`.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round_ties_even() / factor
}
