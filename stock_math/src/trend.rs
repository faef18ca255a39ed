//! Linear trend fitting and extrapolation
//!
//! Fits `close = intercept + slope * day` by ordinary least squares, where
//! `day` is the 0-based position in the series (trading days, no calendar
//! gaps). The fitted line can then be extended past the last observation.

use crate::round_to;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Decimal places kept for the root mean squared error
const RMSE_DECIMALS: u32 = 5;
/// Decimal places kept for predicted prices
const PREDICTION_DECIMALS: u32 = 2;

/// Parameters of a least-squares line fitted over day indices `0..observations`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    slope: f64,
    intercept: f64,
    r_value: f64,
    observations: usize,
}

impl LinearFit {
    /// Create a fit from known parameters
    pub fn new(slope: f64, intercept: f64, r_value: f64, observations: usize) -> Self {
        Self {
            slope,
            intercept,
            r_value,
            observations,
        }
    }

    /// Get the slope (price change per trading day)
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Get the intercept (fitted price at day 0)
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Get the Pearson correlation coefficient
    pub fn r_value(&self) -> f64 {
        self.r_value
    }

    /// Get the coefficient of determination
    pub fn r_squared(&self) -> f64 {
        self.r_value * self.r_value
    }

    /// Number of observations the line was fitted over
    pub fn observations(&self) -> usize {
        self.observations
    }

    /// Value of the fitted line at an absolute day index
    pub fn value_at(&self, day: usize) -> f64 {
        self.intercept + self.slope * day as f64
    }
}

/// A fitted trend together with its in-sample line and error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendFit {
    fit: LinearFit,
    trendline: Vec<f64>,
    rmse: f64,
}

impl TrendFit {
    /// Get the line parameters
    pub fn fit(&self) -> &LinearFit {
        &self.fit
    }

    /// Fitted values for every observation
    pub fn trendline(&self) -> &[f64] {
        &self.trendline
    }

    /// Root mean squared error of the trendline, rounded to 5 decimals
    pub fn rmse(&self) -> f64 {
        self.rmse
    }
}

/// Fit a least-squares line through `closes` against their day index.
///
/// Fewer than two closes give `NaN` parameters. A series with no variance
/// in price gets a correlation of zero.
pub fn fit_linear_trend(closes: &[f64]) -> TrendFit {
    let n = closes.len();
    let count = n as f64;

    let x_mean = (0..n).map(|i| i as f64).sum::<f64>() / count;
    let y_mean = closes.iter().sum::<f64>() / count;

    let mut ss_x = 0.0;
    let mut ss_y = 0.0;
    let mut ss_xy = 0.0;
    for (i, &y) in closes.iter().enumerate() {
        let dx = i as f64 - x_mean;
        let dy = y - y_mean;
        ss_x += dx * dx;
        ss_y += dy * dy;
        ss_xy += dx * dy;
    }

    let (slope, intercept, r_value) = if n < 2 {
        (f64::NAN, f64::NAN, f64::NAN)
    } else {
        let slope = ss_xy / ss_x;
        let r_den = (ss_x * ss_y).sqrt();
        let r_value = if r_den == 0.0 {
            0.0
        } else {
            (ss_xy / r_den).clamp(-1.0, 1.0)
        };
        (slope, y_mean - slope * x_mean, r_value)
    };

    let fit = LinearFit::new(slope, intercept, r_value, n);
    let trendline: Vec<f64> = (0..n).map(|i| fit.value_at(i)).collect();

    let mse = closes
        .iter()
        .zip(&trendline)
        .map(|(actual, fitted)| (actual - fitted).powi(2))
        .sum::<f64>()
        / count;
    let rmse = round_to(mse.sqrt(), RMSE_DECIMALS);

    debug!(slope, intercept, r_value, rmse, observations = n, "fitted linear trend");

    TrendFit {
        fit,
        trendline,
        rmse,
    }
}

/// Predict the close `days_ahead` steps past the fitted range.
///
/// Targets day index `observations + days_ahead`, rounded to 2 decimals.
/// `days_ahead` counts trading-day steps; mapping it onto the calendar is up
/// to the caller.
pub fn predict_value(fit: &LinearFit, days_ahead: usize) -> f64 {
    round_to(
        fit.value_at(fit.observations + days_ahead),
        PREDICTION_DECIMALS,
    )
}

/// Predict every close on the path to `days_ahead`.
///
/// Covers day indices `observations + 1 ..= observations + days_ahead`, so
/// the last entry equals [`predict_value`] for the same `days_ahead`.
pub fn predict_series(fit: &LinearFit, days_ahead: usize) -> Vec<f64> {
    let start = fit.observations + 1;
    (start..start + days_ahead)
        .map(|day| round_to(fit.value_at(day), PREDICTION_DECIMALS))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_exact_line() {
        let closes: Vec<f64> = (0..10).map(|i| 3.0 + 2.0 * i as f64).collect();
        let trend = fit_linear_trend(&closes);

        assert_relative_eq!(trend.fit().slope(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(trend.fit().intercept(), 3.0, epsilon = 1e-12);
        assert_relative_eq!(trend.fit().r_value(), 1.0, epsilon = 1e-12);
        assert_eq!(trend.fit().observations(), 10);
        assert_eq!(trend.rmse(), 0.0);
        assert_eq!(trend.trendline().len(), 10);
    }

    #[test]
    fn test_known_residuals() {
        // Best fit through (0,1) (1,3) (2,2): slope 0.5, intercept 1.5
        let trend = fit_linear_trend(&[1.0, 3.0, 2.0]);
        assert_relative_eq!(trend.fit().slope(), 0.5, epsilon = 1e-12);
        assert_relative_eq!(trend.fit().intercept(), 1.5, epsilon = 1e-12);
        // residuals -0.5, 1.0, -0.5 -> mse 0.5
        assert_eq!(trend.rmse(), round_to(0.5f64.sqrt(), 5));
        assert_relative_eq!(trend.fit().r_squared(), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_flat_series_has_zero_correlation() {
        let trend = fit_linear_trend(&[5.0; 8]);
        assert_eq!(trend.fit().slope(), 0.0);
        assert_eq!(trend.fit().r_value(), 0.0);
        assert_eq!(trend.fit().intercept(), 5.0);
    }

    #[test]
    fn test_degenerate_input_does_not_panic() {
        let single = fit_linear_trend(&[7.0]);
        assert!(single.fit().slope().is_nan());
        assert_eq!(single.trendline().len(), 1);

        let empty = fit_linear_trend(&[]);
        assert!(empty.fit().slope().is_nan());
        assert!(empty.trendline().is_empty());
        assert!(predict_series(empty.fit(), 3).iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_prediction_zero_days() {
        let fit = LinearFit::new(1.0, 0.0, 1.0, 4);
        assert_eq!(predict_value(&fit, 0), 4.0);
        assert!(predict_series(&fit, 0).is_empty());
    }

    #[test]
    fn test_predict_value_targets_n_plus_d() {
        let fit = LinearFit::new(0.5, 10.0, 1.0, 20);
        assert_eq!(predict_value(&fit, 4), 22.0);
        assert_eq!(predict_series(&fit, 4), vec![20.5, 21.0, 21.5, 22.0]);
    }
}
