//! # Market Data
//!
//! Daily price data for the stock analyser.
//!
//! ## Features
//!
//! - Chronologically ordered daily bars ([`PriceSeries`])
//! - CSV loading with column detection ([`DataLoader`])
//! - Yahoo Finance history download with ticker metadata ([`yahoo::YahooClient`])
//!
//! ## Quick Start
//!
//! ```no_run
//! use market_data::DataLoader;
//!
//! let series = DataLoader::from_csv("AAPL.csv")?;
//! println!("{} closes, last {:?}", series.len(), series.last());
//! # Ok::<(), market_data::DataError>(())
//! ```

pub mod error;
pub mod loader;
pub mod series;
pub mod ticker;
pub mod yahoo;

// Re-export commonly used types
pub use crate::error::{DataError, Result};
pub use crate::loader::DataLoader;
pub use crate::series::{PriceBar, PriceSeries};
pub use crate::ticker::TickerInfo;
pub use crate::yahoo::{PriceHistory, YahooClient};
