//! Descriptive statistics of closing prices

use crate::round_to;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

const SUMMARY_DECIMALS: u32 = 2;

/// Summary of a closing price column, every figure rounded to 2 decimals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClosingPriceSummary {
    /// Arithmetic mean
    pub mean: f64,
    /// Sample standard deviation
    pub std_dev: f64,
    /// Coefficient of variation in percent
    pub coefficient_of_variation: f64,
    /// Lowest close
    pub min: f64,
    /// First quartile
    pub q1: f64,
    /// Median
    pub q2: f64,
    /// Third quartile
    pub q3: f64,
    /// Highest close
    pub max: f64,
    /// Difference between the highest and lowest close
    pub range: f64,
}

impl ClosingPriceSummary {
    /// Summarise `closes`. An empty column yields `NaN` everywhere.
    ///
    /// The range and the coefficient of variation are derived from the
    /// already rounded figures.
    pub fn from_closes(closes: &[f64]) -> Self {
        let rounded = |v: f64| round_to(v, SUMMARY_DECIMALS);

        let mean = rounded(Statistics::mean(closes));
        let std_dev = rounded(Statistics::std_dev(closes));
        let min = rounded(Statistics::min(closes));
        let max = rounded(Statistics::max(closes));

        let mut sorted: Vec<f64> = closes.to_vec();
        sorted.sort_by(f64::total_cmp);

        Self {
            mean,
            std_dev,
            coefficient_of_variation: rounded(std_dev / mean) * 100.0,
            min,
            q1: rounded(quantile(&sorted, 0.25)),
            q2: rounded(quantile(&sorted, 0.5)),
            q3: rounded(quantile(&sorted, 0.75)),
            max,
            range: rounded(max - min),
        }
    }
}

/// Quantile of an ascending slice, linearly interpolated between the two
/// nearest order statistics.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }

    let position = (sorted.len() - 1) as f64 * q.clamp(0.0, 1.0);
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

impl std::fmt::Display for ClosingPriceSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:=^35}", " Closing Price Summary ")?;
        let rows = [
            ("\u{03BC} (mean)", self.mean),
            ("\u{03C3} (std)", self.std_dev),
            ("COV", self.coefficient_of_variation),
            ("Min", self.min),
            ("Q1 (25%)", self.q1),
            ("Q2 (50%)", self.q2),
            ("Q3 (75%)", self.q3),
            ("Max", self.max),
            ("Range", self.range),
        ];
        for (label, value) in rows {
            writeln!(f, "| {:16} | {:12} |", label, value)?;
        }
        write!(f, "{}", "=".repeat(35))
    }
}
