//! Validated analysis request

use crate::error::{AnalyserError, Result};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Largest supported prediction horizon in days
pub const MAX_DAYS_AHEAD: i64 = 20;

/// One user request: a ticker, a date range and a prediction horizon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    ticker: String,
    start: NaiveDate,
    end: NaiveDate,
    days_ahead: usize,
}

impl AnalysisRequest {
    /// Validate the user's input.
    ///
    /// The error message of a rejected request is the notice shown to the user.
    pub fn new(ticker: &str, start: NaiveDate, end: NaiveDate, days_ahead: i64) -> Result<Self> {
        let ticker = ticker.trim();
        if ticker.is_empty() {
            return Err(AnalyserError::InvalidInput(
                "Please enter a stock ticker".to_string(),
            ));
        }

        if !ticker.chars().all(is_ticker_char) {
            return Err(AnalyserError::InvalidInput(
                "Please enter a valid stock ticker.".to_string(),
            ));
        }

        if !(0..=MAX_DAYS_AHEAD).contains(&days_ahead) {
            return Err(AnalyserError::InvalidInput(format!(
                "Please enter a number between 0 and {} for the prediction.",
                MAX_DAYS_AHEAD
            )));
        }

        if start > end {
            return Err(AnalyserError::InvalidInput(
                "Please make sure the Start Date lies before the End Date.".to_string(),
            ));
        }

        Ok(Self {
            ticker: ticker.to_uppercase(),
            start,
            end,
            days_ahead: days_ahead as usize,
        })
    }

    /// Upper-case ticker symbol
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// First date of the range
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// End of the range (exclusive)
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Prediction horizon
    pub fn days_ahead(&self) -> usize {
        self.days_ahead
    }

    /// Date the prediction is reported for.
    ///
    /// The end date moved `days_ahead` calendar days forward, then past any
    /// weekend. Holidays are not considered.
    pub fn target_date(&self) -> NaiveDate {
        next_weekday(self.end + Duration::days(self.days_ahead as i64))
    }
}

/// Characters that appear in exchange symbols, e.g. `BRK-B`, `^GSPC`, `EURUSD=X`, `AIR.NZ`
fn is_ticker_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '^' | '=' | '-')
}

/// `date` itself if it is a weekday, otherwise the following Monday
pub fn next_weekday(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat => date + Duration::days(2),
        Weekday::Sun => date + Duration::days(1),
        _ => date,
    }
}
