//! Daily price series

use crate::error::{DataError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading day of price data
///
/// Only the close is required; sources that lack the other fields leave
/// them empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Trading date
    pub date: NaiveDate,
    /// Open price
    pub open: Option<f64>,
    /// High price
    pub high: Option<f64>,
    /// Low price
    pub low: Option<f64>,
    /// Close price
    pub close: f64,
    /// Traded volume
    pub volume: Option<u64>,
}

impl PriceBar {
    /// Create a bar holding only a close
    pub fn from_close(date: NaiveDate, close: f64) -> Self {
        Self {
            date,
            open: None,
            high: None,
            low: None,
            close,
            volume: None,
        }
    }
}

/// Chronologically ordered daily bars
///
/// Positions, not calendar dates, drive every windowed calculation, so
/// missing trading days are not filled in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Create a series, sorting the bars by date
    pub fn new(mut bars: Vec<PriceBar>) -> Self {
        bars.sort_by_key(|bar| bar.date);
        Self { bars }
    }

    /// Create a close-only series from dates and values
    pub fn from_closes(dates: Vec<NaiveDate>, closes: Vec<f64>) -> Result<Self> {
        if dates.len() != closes.len() {
            return Err(DataError::Parse(format!(
                "Dates length ({}) doesn't match closes length ({})",
                dates.len(),
                closes.len()
            )));
        }

        Ok(Self::new(
            dates
                .into_iter()
                .zip(closes)
                .map(|(date, close)| PriceBar::from_close(date, close))
                .collect(),
        ))
    }

    /// Number of bars
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Whether the series has no bars
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Get the bars
    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    /// Get the close prices as a vector
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.close).collect()
    }

    /// Get the volumes as a vector
    pub fn volumes(&self) -> Vec<Option<u64>> {
        self.bars.iter().map(|bar| bar.volume).collect()
    }

    /// Get the dates as a vector
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|bar| bar.date).collect()
    }

    /// Whether every bar carries a volume
    pub fn has_volume(&self) -> bool {
        !self.bars.is_empty() && self.bars.iter().all(|bar| bar.volume.is_some())
    }

    /// First bar
    pub fn first(&self) -> Option<&PriceBar> {
        self.bars.first()
    }

    /// Last bar
    pub fn last(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    /// First `n` bars
    pub fn head(&self, n: usize) -> &[PriceBar] {
        &self.bars[..n.min(self.bars.len())]
    }

    /// Last `n` bars
    pub fn tail(&self, n: usize) -> &[PriceBar] {
        &self.bars[self.bars.len().saturating_sub(n)..]
    }

    /// Bars dated in `start..end` (end exclusive)
    pub fn between(&self, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            bars: self
                .bars
                .iter()
                .filter(|bar| bar.date >= start && bar.date < end)
                .cloned()
                .collect(),
        }
    }
}

impl From<Vec<PriceBar>> for PriceSeries {
    fn from(bars: Vec<PriceBar>) -> Self {
        Self::new(bars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, day).unwrap()
    }

    #[test]
    fn test_new_sorts_by_date() {
        let series = PriceSeries::new(vec![
            PriceBar::from_close(date(3), 3.0),
            PriceBar::from_close(date(1), 1.0),
            PriceBar::from_close(date(2), 2.0),
        ]);
        assert_eq!(series.closes(), vec![1.0, 2.0, 3.0]);
        assert_eq!(series.first().unwrap().date, date(1));
        assert_eq!(series.last().unwrap().date, date(3));
    }

    #[test]
    fn test_from_closes_length_mismatch() {
        assert!(PriceSeries::from_closes(vec![date(1)], vec![1.0, 2.0]).is_err());
    }

    #[test]
    fn test_head_tail() {
        let series =
            PriceSeries::from_closes((1..=7).map(date).collect(), (1..=7).map(f64::from).collect())
                .unwrap();
        assert_eq!(series.head(5).len(), 5);
        assert_eq!(series.tail(5)[0].close, 3.0);
        assert_eq!(series.head(10).len(), 7);
        assert_eq!(series.tail(10).len(), 7);
    }

    #[test]
    fn test_between_excludes_end() {
        let series =
            PriceSeries::from_closes((1..=5).map(date).collect(), vec![1.0; 5]).unwrap();
        let window = series.between(date(2), date(4));
        assert_eq!(window.dates(), vec![date(2), date(3)]);
    }

    #[test]
    fn test_has_volume() {
        let mut bar = PriceBar::from_close(date(1), 1.0);
        assert!(!PriceSeries::new(vec![bar.clone()]).has_volume());
        bar.volume = Some(100);
        assert!(PriceSeries::new(vec![bar]).has_volume());
        assert!(!PriceSeries::default().has_volume());
    }
}
