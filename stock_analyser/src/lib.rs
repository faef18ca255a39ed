//! # Stock Analyser
//!
//! Presentation layer of the stock analyser: validates a request, loads the
//! price data, runs the descriptive and predictive analyses and exports
//! their charts.
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use stock_analyser::{AnalyserConfig, Analyser, AnalysisKind, AnalysisRequest};
//!
//! let request = AnalysisRequest::new(
//!     "AAPL",
//!     NaiveDate::from_ymd_opt(2019, 11, 23).unwrap(),
//!     NaiveDate::from_ymd_opt(2020, 11, 23).unwrap(),
//!     5,
//! )?;
//! let analyser = Analyser::fetch(request, &AnalyserConfig::default())?;
//! if let Some(report) = analyser.run(AnalysisKind::Prediction).report {
//!     println!("{}", report);
//! }
//! # Ok::<(), stock_analyser::AnalyserError>(())
//! ```

pub mod analysis;
pub mod chart;
pub mod config;
pub mod error;
pub mod report;
pub mod request;

pub use crate::analysis::{AnalysedSeries, Analyser, AnalysisKind, AnalysisOutput};
pub use crate::chart::{Chart, ChartColumn};
pub use crate::config::AnalyserConfig;
pub use crate::error::{AnalyserError, Result};
pub use crate::report::{DataOverview, FitAssessment, PredictionReport, RequestSummary};
pub use crate::request::AnalysisRequest;
