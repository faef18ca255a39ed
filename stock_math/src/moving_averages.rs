//! Moving average calculation implementations
//!
//! Contains streaming implementations of the moving averages used by the
//! indicator engine, plus batch helpers that turn a whole price column into
//! an aligned derived column:
//! - Simple Moving Average (SMA)
//! - Weighted Moving Average (WMA), linear weights
//! - Exponential Moving Average (EMA), adjusted weighting

use crate::{MathError, Result};
use std::collections::VecDeque;

/// Simple Moving Average (SMA) implementation
#[derive(Debug, Clone)]
pub struct SimpleMovingAverage {
    period: usize,
    values: VecDeque<f64>,
}

impl SimpleMovingAverage {
    /// Create a new Simple Moving Average with the specified period
    pub fn new(period: usize) -> Result<Self> {
        if period == 0 {
            return Err(MathError::InvalidInput(
                "Period must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            period,
            values: VecDeque::with_capacity(period),
        })
    }

    /// Update the SMA with a new value
    pub fn update(&mut self, value: f64) {
        self.values.push_back(value);

        // Remove oldest value if we have more than period values
        if self.values.len() > self.period {
            self.values.pop_front();
        }
    }

    /// Get the current SMA value
    ///
    /// The window is summed on every call, so a `NaN` only affects the
    /// values whose window contains it.
    pub fn value(&self) -> Result<f64> {
        if self.values.len() < self.period {
            return Err(MathError::InsufficientData(format!(
                "Not enough data for SMA calculation. Need {} values, have {}.",
                self.period,
                self.values.len()
            )));
        }

        Ok(self.values.iter().sum::<f64>() / self.period as f64)
    }

    /// Get the current period
    pub fn period(&self) -> usize {
        self.period
    }

    /// Reset the SMA, clearing all values
    pub fn reset(&mut self) {
        self.values.clear();
    }
}

/// Weighted Moving Average (WMA) with linear weights `1..=period`
///
/// The oldest value in the window gets weight 1 and the most recent gets
/// weight `period`. The weighted sum is divided by the sum of the weights.
#[derive(Debug, Clone)]
pub struct WeightedMovingAverage {
    period: usize,
    values: VecDeque<f64>,
    weight_sum: f64,
}

impl WeightedMovingAverage {
    /// Create a new Weighted Moving Average with the specified period
    pub fn new(period: usize) -> Result<Self> {
        if period == 0 {
            return Err(MathError::InvalidInput(
                "Period must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            period,
            values: VecDeque::with_capacity(period),
            weight_sum: (period * (period + 1) / 2) as f64,
        })
    }

    /// Update the WMA with a new value
    pub fn update(&mut self, value: f64) {
        self.values.push_back(value);

        if self.values.len() > self.period {
            self.values.pop_front();
        }
    }

    /// Get the current WMA value
    pub fn value(&self) -> Result<f64> {
        if self.values.len() < self.period {
            return Err(MathError::InsufficientData(format!(
                "Not enough data for WMA calculation. Need {} values, have {}.",
                self.period,
                self.values.len()
            )));
        }

        let weighted: f64 = self
            .values
            .iter()
            .enumerate()
            .map(|(i, &v)| (i + 1) as f64 * v)
            .sum();

        Ok(weighted / self.weight_sum)
    }

    /// Get the current period
    pub fn period(&self) -> usize {
        self.period
    }

    /// Reset the WMA, clearing all values
    pub fn reset(&mut self) {
        self.values.clear();
    }
}

/// Exponential Moving Average (EMA) implementation
///
/// Uses adjusted weighting: every value is the weighted mean of all
/// observations seen so far, with weight `(1 - alpha)^k` for the observation
/// `k` steps back and `alpha = 2 / (span + 1)`. The first value equals the
/// first observation, and the early values behave like an expanding mean
/// tilted toward recent prices.
#[derive(Debug, Clone)]
pub struct ExponentialMovingAverage {
    period: usize,
    alpha: f64,
    old_weight: f64,
    current_ema: Option<f64>,
}

impl ExponentialMovingAverage {
    /// Create a new Exponential Moving Average with the specified span
    pub fn new(period: usize) -> Result<Self> {
        if period == 0 {
            return Err(MathError::InvalidInput(
                "Period must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            period,
            alpha: 2.0 / (period as f64 + 1.0),
            old_weight: 1.0,
            current_ema: None,
        })
    }

    /// Update the EMA with a new value
    ///
    /// A `NaN` observation keeps the current value but still ages the
    /// weights of everything seen before it.
    pub fn update(&mut self, value: f64) {
        match self.current_ema {
            None => {
                if !value.is_nan() {
                    self.current_ema = Some(value);
                }
            }
            Some(current) => {
                self.old_weight *= 1.0 - self.alpha;
                if !value.is_nan() {
                    if current != value {
                        let blended =
                            (self.old_weight * current + value) / (self.old_weight + 1.0);
                        self.current_ema = Some(blended);
                    }
                    self.old_weight += 1.0;
                }
            }
        }
    }

    /// Get the current EMA value
    pub fn value(&self) -> Result<f64> {
        match self.current_ema {
            Some(ema) => Ok(ema),
            None => Err(MathError::InsufficientData(
                "Not enough data for EMA calculation. Need at least one observation."
                    .to_string(),
            )),
        }
    }

    /// Get the current period (span)
    pub fn period(&self) -> usize {
        self.period
    }

    /// Get the smoothing factor
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Reset the EMA, clearing all values
    pub fn reset(&mut self) {
        self.old_weight = 1.0;
        self.current_ema = None;
    }
}

/// Trailing simple moving average of `values`, aligned with the input.
///
/// The first `period - 1` entries are `NaN`. A zero period yields a column
/// of `NaN`.
pub fn simple_moving_average(values: &[f64], period: usize) -> Vec<f64> {
    let Ok(mut sma) = SimpleMovingAverage::new(period) else {
        return vec![f64::NAN; values.len()];
    };

    values
        .iter()
        .map(|&value| {
            sma.update(value);
            sma.value().unwrap_or(f64::NAN)
        })
        .collect()
}

/// Trailing linearly weighted moving average of `values`, aligned with the input.
pub fn weighted_moving_average(values: &[f64], period: usize) -> Vec<f64> {
    let Ok(mut wma) = WeightedMovingAverage::new(period) else {
        return vec![f64::NAN; values.len()];
    };

    values
        .iter()
        .map(|&value| {
            wma.update(value);
            wma.value().unwrap_or(f64::NAN)
        })
        .collect()
}

/// Adjusted exponential moving average of `values` with the given span.
///
/// Every position after the first observation is defined.
pub fn exponential_moving_average(values: &[f64], span: usize) -> Vec<f64> {
    let Ok(mut ema) = ExponentialMovingAverage::new(span) else {
        return vec![f64::NAN; values.len()];
    };

    values
        .iter()
        .map(|&value| {
            ema.update(value);
            ema.value().unwrap_or(f64::NAN)
        })
        .collect()
}
