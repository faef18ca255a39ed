//! Analysis selection and execution
//!
//! An [`Analyser`] is built once per request from downloaded or local price
//! data. Every [`AnalysisKind`] then runs against the same immutable table.

use crate::chart::Chart;
use crate::config::AnalyserConfig;
use crate::error::{AnalyserError, Result};
use crate::report::{DataOverview, FitAssessment, PredictionReport, RequestSummary};
use crate::request::AnalysisRequest;
use market_data::{DataError, DataLoader, PriceSeries, TickerInfo, YahooClient};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use stock_math::{
    compute_indicators, fit_linear_trend, predict_series, predict_value, Indicator,
    IndicatorColumns, TrendFit,
};
use tracing::info;

/// Analyses offered to the user
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum AnalysisKind {
    /// Head and tail of the data, closing price summary and ticker overview
    DataOverview,
    /// Closing price and volume over time
    PriceAndVolume,
    /// Short and long term moving averages
    MovingAverageCross,
    /// Weighted moving average against the close
    WeightedMaVsClose,
    /// MACD and its signal line
    Macd,
    /// Closing price with its fitted linear trend
    LinearTrend,
    /// Predicted close at the target date
    Prediction,
}

impl AnalysisKind {
    /// Descriptive analyses in menu order
    pub const DESCRIPTIVE: [AnalysisKind; 5] = [
        AnalysisKind::DataOverview,
        AnalysisKind::PriceAndVolume,
        AnalysisKind::MovingAverageCross,
        AnalysisKind::WeightedMaVsClose,
        AnalysisKind::Macd,
    ];

    /// Predictive analyses in menu order
    pub const PREDICTIVE: [AnalysisKind; 2] = [AnalysisKind::LinearTrend, AnalysisKind::Prediction];

    /// Every analysis in menu order
    pub fn all() -> Vec<AnalysisKind> {
        Self::DESCRIPTIVE
            .iter()
            .chain(Self::PREDICTIVE.iter())
            .copied()
            .collect()
    }

    /// Menu label
    pub fn label(&self) -> &'static str {
        match self {
            AnalysisKind::DataOverview => "Data Overview",
            AnalysisKind::PriceAndVolume => "Time Series - Price & Volume",
            AnalysisKind::MovingAverageCross => "Moving Average Cross",
            AnalysisKind::WeightedMaVsClose => "Weighted MA vs Closing Price",
            AnalysisKind::Macd => "MACD",
            AnalysisKind::LinearTrend => "Time Series with Linear Trend",
            AnalysisKind::Prediction => "Predict the Future - LinReg",
        }
    }

    /// Whether the analysis works on the fitted trend
    pub fn is_predictive(&self) -> bool {
        matches!(self, AnalysisKind::LinearTrend | AnalysisKind::Prediction)
    }

    /// Look an analysis up by its menu label
    pub fn from_label(label: &str) -> Option<AnalysisKind> {
        Self::all().into_iter().find(|kind| kind.label() == label)
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Price series with its indicator columns attached
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysedSeries {
    prices: PriceSeries,
    indicators: IndicatorColumns,
}

impl AnalysedSeries {
    /// Compute the indicators of `prices`
    pub fn new(prices: PriceSeries) -> Self {
        let indicators = compute_indicators(&prices.closes());
        Self { prices, indicators }
    }

    /// Source rows
    pub fn prices(&self) -> &PriceSeries {
        &self.prices
    }

    /// Indicator columns, aligned with the rows
    pub fn indicators(&self) -> &IndicatorColumns {
        &self.indicators
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Whether there are no rows
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

/// Result of one analysis
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOutput {
    /// Which analysis produced this
    pub kind: AnalysisKind,
    /// Text to show the user
    pub report: Option<String>,
    /// Chart data to export
    pub chart: Option<Chart>,
}

/// Runs analyses for one validated request
#[derive(Debug, Clone)]
pub struct Analyser {
    request: AnalysisRequest,
    series: AnalysedSeries,
    info: TickerInfo,
    trend: TrendFit,
}

impl Analyser {
    /// Build an analyser from price data already in memory
    pub fn new(request: AnalysisRequest, prices: PriceSeries, info: TickerInfo) -> Result<Self> {
        if prices.is_empty() {
            return Err(DataError::NoData.into());
        }

        let series = AnalysedSeries::new(prices);
        let trend = fit_linear_trend(&series.prices().closes());
        info!(
            ticker = request.ticker(),
            rows = series.len(),
            "analysed price series"
        );

        Ok(Self {
            request,
            series,
            info,
            trend,
        })
    }

    /// Download the requested range from the configured provider
    pub fn fetch(request: AnalysisRequest, config: &AnalyserConfig) -> Result<Self> {
        let client = YahooClient::new(&config.base_url, &config.user_agent, config.timeout())?;
        let history = client
            .fetch_history(request.ticker(), request.start(), request.end())
            .map_err(|e| match e {
                DataError::UnknownTicker(_) => {
                    AnalyserError::InvalidInput("Please enter a valid stock ticker.".to_string())
                }
                other => other.into(),
            })?;
        Self::new(request, history.series, history.info)
    }

    /// Load a local CSV file, keeping only rows inside the requested range
    pub fn from_csv(request: AnalysisRequest, path: impl AsRef<Path>) -> Result<Self> {
        let prices = DataLoader::from_csv(path)?.between(request.start(), request.end());
        let info = TickerInfo::from_symbol(request.ticker());
        Self::new(request, prices, info)
    }

    /// Validated request
    pub fn request(&self) -> &AnalysisRequest {
        &self.request
    }

    /// Analysed table
    pub fn series(&self) -> &AnalysedSeries {
        &self.series
    }

    /// Ticker metadata
    pub fn info(&self) -> &TickerInfo {
        &self.info
    }

    /// Company name, or the symbol when the provider has none
    pub fn company_name(&self) -> &str {
        self.info.company_name()
    }

    /// Linear trend fitted over the closes
    pub fn trend(&self) -> &TrendFit {
        &self.trend
    }

    /// Summary shown once the data is stored
    pub fn summary(&self) -> RequestSummary {
        RequestSummary::new(&self.request, self.company_name())
    }

    /// Predict the close at the target date
    pub fn prediction(&self) -> PredictionReport {
        let fit = self.trend.fit();
        let days_ahead = self.request.days_ahead();
        PredictionReport {
            target_date: self.request.target_date(),
            value: predict_value(fit, days_ahead),
            days_ahead,
            series: predict_series(fit, days_ahead),
            assessment: FitAssessment::new(&self.trend),
        }
    }

    /// Run one analysis
    pub fn run(&self, kind: AnalysisKind) -> AnalysisOutput {
        let (report, chart) = match kind {
            AnalysisKind::DataOverview => (
                Some(DataOverview::new(&self.series, &self.info).to_string()),
                None,
            ),
            AnalysisKind::PriceAndVolume => (None, Some(self.price_and_volume_chart())),
            AnalysisKind::MovingAverageCross => (
                None,
                Some(self.indicator_chart(
                    kind,
                    "moving_average_cross",
                    &[Indicator::ShortTermMa, Indicator::LongTermMa],
                )),
            ),
            AnalysisKind::WeightedMaVsClose => (
                None,
                Some(self.indicator_chart(
                    kind,
                    "weighted_ma_vs_close",
                    &[Indicator::WeightedMa],
                )),
            ),
            AnalysisKind::Macd => (None, Some(self.macd_chart())),
            AnalysisKind::LinearTrend => (
                None,
                Some(
                    self.base_chart(kind, "linear_trend")
                        .with_column("Close", self.series.prices().closes())
                        .with_column("Linear Trend", self.trend.trendline().to_vec()),
                ),
            ),
            AnalysisKind::Prediction => (Some(self.prediction().to_string()), None),
        };

        AnalysisOutput {
            kind,
            report,
            chart,
        }
    }

    fn base_chart(&self, kind: AnalysisKind, slug: &str) -> Chart {
        Chart::new(
            format!("{}: {}", self.company_name(), kind.label()),
            slug,
            self.series.prices().dates(),
        )
    }

    fn price_and_volume_chart(&self) -> Chart {
        let prices = self.series.prices();
        let volumes = prices
            .volumes()
            .into_iter()
            .map(|v| v.map_or(f64::NAN, |v| v as f64))
            .collect();
        self.base_chart(AnalysisKind::PriceAndVolume, "price_volume")
            .with_column("Close", prices.closes())
            .with_column("Volume", volumes)
    }

    fn indicator_chart(&self, kind: AnalysisKind, slug: &str, indicators: &[Indicator]) -> Chart {
        let mut chart = self.base_chart(kind, slug);
        if kind == AnalysisKind::WeightedMaVsClose {
            chart = chart.with_column("Close", self.series.prices().closes());
        }
        for &indicator in indicators {
            chart = chart.with_column(
                indicator.label(),
                self.series.indicators().get(indicator).to_vec(),
            );
        }
        chart
    }

    fn macd_chart(&self) -> Chart {
        let indicators = self.series.indicators();
        self.base_chart(AnalysisKind::Macd, "macd")
            .with_column("Baseline", vec![0.0; self.series.len()])
            .with_column("Signal Line", indicators.get(Indicator::MacdSignal).to_vec())
            .with_column("MACD", indicators.get(Indicator::Macd).to_vec())
    }
}
