//! # Stock Analyser Workspace
//!
//! Re-exports the crates of the workspace under one roof:
//!
//! - [`math`]: moving averages, indicators, linear trend and predictions
//! - [`data`]: price series, CSV loading and the Yahoo Finance client
//! - [`analyser`]: request validation, analyses, reports and chart export
//!
//! ## Example
//!
//! ```
//! use stock_analyser_workspace::math::{fit_linear_trend, predict_series, predict_value};
//!
//! let closes: Vec<f64> = (0..30).map(|i| 50.0 + i as f64).collect();
//! let trend = fit_linear_trend(&closes);
//!
//! assert_eq!(predict_value(trend.fit(), 5), 85.0);
//! assert_eq!(predict_series(trend.fit(), 2), vec![81.0, 82.0]);
//! ```

pub use market_data as data;
pub use stock_analyser as analyser;
pub use stock_math as math;
