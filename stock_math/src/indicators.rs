//! Fixed indicator set computed over a closing price column
//!
//! - Short term simple moving average (50 periods)
//! - Long term simple moving average (200 periods)
//! - Weighted moving average (10 periods)
//! - Moving Average Convergence Divergence (12/26) and its signal line (9)
//!
//! All columns are aligned position-for-position with the input and never
//! drop rows. Windows that are not yet full are `NaN`.

use crate::moving_averages::{
    exponential_moving_average, simple_moving_average, weighted_moving_average,
};
use crate::round_to;
use serde::{Deserialize, Serialize};

/// Short term moving average window
pub const SHORT_MA_PERIOD: usize = 50;
/// Long term moving average window
pub const LONG_MA_PERIOD: usize = 200;
/// Weighted moving average window
pub const WEIGHTED_MA_PERIOD: usize = 10;
/// Fast EMA span of the MACD
pub const MACD_FAST_PERIOD: usize = 12;
/// Slow EMA span of the MACD
pub const MACD_SLOW_PERIOD: usize = 26;
/// EMA span of the MACD signal line
pub const MACD_SIGNAL_PERIOD: usize = 9;

/// Decimal places kept for the exponential averages and the signal line
const EMA_DECIMALS: u32 = 3;

/// Derived columns published by the indicator engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Indicator {
    /// 50 period simple moving average
    ShortTermMa,
    /// 200 period simple moving average
    LongTermMa,
    /// 10 period weighted moving average
    WeightedMa,
    /// 12/26 EMA difference
    Macd,
    /// 9 period EMA of the MACD
    MacdSignal,
}

impl Indicator {
    /// All published indicators in table order
    pub const ALL: [Indicator; 5] = [
        Indicator::ShortTermMa,
        Indicator::LongTermMa,
        Indicator::WeightedMa,
        Indicator::Macd,
        Indicator::MacdSignal,
    ];

    /// Column label
    pub fn label(&self) -> &'static str {
        match self {
            Indicator::ShortTermMa => "Short Term MA (50d)",
            Indicator::LongTermMa => "Long Term MA (200d)",
            Indicator::WeightedMa => "Weighted MA (10d)",
            Indicator::Macd => "MACD",
            Indicator::MacdSignal => "MACD Signal",
        }
    }
}

impl std::fmt::Display for Indicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Indicator columns computed for one closing price series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorColumns {
    short_term_ma: Vec<f64>,
    long_term_ma: Vec<f64>,
    weighted_ma: Vec<f64>,
    ema_fast: Vec<f64>,
    ema_slow: Vec<f64>,
    macd: Vec<f64>,
    macd_signal: Vec<f64>,
}

impl IndicatorColumns {
    /// Number of rows in every column
    pub fn len(&self) -> usize {
        self.macd.len()
    }

    /// Whether the columns are empty
    pub fn is_empty(&self) -> bool {
        self.macd.is_empty()
    }

    /// Get a published column
    pub fn get(&self, indicator: Indicator) -> &[f64] {
        match indicator {
            Indicator::ShortTermMa => &self.short_term_ma,
            Indicator::LongTermMa => &self.long_term_ma,
            Indicator::WeightedMa => &self.weighted_ma,
            Indicator::Macd => &self.macd,
            Indicator::MacdSignal => &self.macd_signal,
        }
    }

    /// 12 period EMA, rounded to 3 decimals
    pub fn ema_fast(&self) -> &[f64] {
        &self.ema_fast
    }

    /// 26 period EMA, rounded to 3 decimals
    pub fn ema_slow(&self) -> &[f64] {
        &self.ema_slow
    }

    /// Values of every published indicator at `row`
    pub fn row(&self, row: usize) -> Option<[(Indicator, f64); 5]> {
        if row >= self.len() {
            return None;
        }
        Some(Indicator::ALL.map(|indicator| (indicator, self.get(indicator)[row])))
    }
}

/// Compute the indicator columns for a chronologically ordered close column.
///
/// The MACD is the difference of the rounded 12 and 26 period EMAs and is
/// not rounded again; the signal line is rounded to 3 decimals. Series that
/// are shorter than a window simply produce `NaN` for that column.
pub fn compute_indicators(closes: &[f64]) -> IndicatorColumns {
    let round_column = |column: Vec<f64>| -> Vec<f64> {
        column
            .into_iter()
            .map(|v| round_to(v, EMA_DECIMALS))
            .collect()
    };

    let ema_fast = round_column(exponential_moving_average(closes, MACD_FAST_PERIOD));
    let ema_slow = round_column(exponential_moving_average(closes, MACD_SLOW_PERIOD));

    let macd: Vec<f64> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(fast, slow)| fast - slow)
        .collect();
    let macd_signal = round_column(exponential_moving_average(&macd, MACD_SIGNAL_PERIOD));

    IndicatorColumns {
        short_term_ma: simple_moving_average(closes, SHORT_MA_PERIOD),
        long_term_ma: simple_moving_average(closes, LONG_MA_PERIOD),
        weighted_ma: weighted_moving_average(closes, WEIGHTED_MA_PERIOD),
        ema_fast,
        ema_slow,
        macd,
        macd_signal,
    }
}
