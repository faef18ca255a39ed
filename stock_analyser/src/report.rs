//! Text reports printed to the user

use crate::analysis::AnalysedSeries;
use crate::request::AnalysisRequest;
use chrono::NaiveDate;
use market_data::TickerInfo;
use stock_math::{round_to, ClosingPriceSummary, Indicator, TrendFit};
use std::fmt;

/// Rows shown at each end of the data overview
pub const OVERVIEW_ROWS: usize = 5;

/// Smallest r² of a fit worth trusting
pub const MIN_R_SQUARED: f64 = 0.75;
/// Largest RMSE of a fit worth trusting
pub const MAX_RMSE: f64 = 25.0;

const R_SQUARED_DECIMALS: u32 = 5;

/// Summary shown once the price data has been stored
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSummary {
    /// Company name, or the symbol when the provider has none
    pub company_name: String,
    /// Upper-case ticker
    pub ticker: String,
    /// First date of the range
    pub start: NaiveDate,
    /// End of the range
    pub end: NaiveDate,
    /// Prediction horizon
    pub days_ahead: usize,
    /// Business day the prediction is reported for
    pub target_date: NaiveDate,
}

impl RequestSummary {
    /// Summarise `request` for `company_name`
    pub fn new(request: &AnalysisRequest, company_name: &str) -> Self {
        Self {
            company_name: company_name.to_string(),
            ticker: request.ticker().to_string(),
            start: request.start(),
            end: request.end(),
            days_ahead: request.days_ahead(),
            target_date: request.target_date(),
        }
    }
}

impl fmt::Display for RequestSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.company_name)?;
        writeln!(f)?;
        writeln!(f, "Ticker {}", self.ticker)?;
        writeln!(f, "Start Date: {}", self.start)?;
        writeln!(f, "End  Date: {}", self.end)?;
        write!(
            f,
            "Day(s) in the Future: {} -> bd {}",
            self.days_ahead, self.target_date
        )
    }
}

/// Head and tail of the analysed table, the closing price summary and the
/// ticker overview
#[derive(Debug, Clone)]
pub struct DataOverview<'a> {
    series: &'a AnalysedSeries,
    info: &'a TickerInfo,
    summary: ClosingPriceSummary,
}

impl<'a> DataOverview<'a> {
    /// Build the overview of `series`
    pub fn new(series: &'a AnalysedSeries, info: &'a TickerInfo) -> Self {
        Self {
            series,
            info,
            summary: ClosingPriceSummary::from_closes(&series.prices().closes()),
        }
    }

    /// Closing price summary
    pub fn summary(&self) -> &ClosingPriceSummary {
        &self.summary
    }

    fn write_rows(&self, f: &mut fmt::Formatter<'_>, rows: std::ops::Range<usize>) -> fmt::Result {
        write!(
            f,
            "{:<10} {:>10} {:>10} {:>10} {:>10} {:>12}",
            "Date", "Open", "High", "Low", "Close", "Volume"
        )?;
        for indicator in Indicator::ALL {
            write!(f, " {:>20}", indicator.label())?;
        }
        writeln!(f)?;

        let bars = self.series.prices().bars();
        for i in rows {
            let bar = &bars[i];
            let volume = bar
                .volume
                .map(|v| v.to_string())
                .unwrap_or_else(|| "n/a".to_string());
            write!(
                f,
                "{:<10} {:>10} {:>10} {:>10} {:>10.2} {:>12}",
                bar.date,
                format_price(bar.open),
                format_price(bar.high),
                format_price(bar.low),
                bar.close,
                volume
            )?;
            for (_, value) in self.series.indicators().row(i).into_iter().flatten() {
                write!(f, " {:>20}", format_value(value))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for DataOverview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = self.series.len();
        let head = 0..OVERVIEW_ROWS.min(len);
        let tail = len.saturating_sub(OVERVIEW_ROWS)..len;

        writeln!(f, "{} DATA SUMMARY", self.info.company_name().to_uppercase())?;
        writeln!(f)?;
        writeln!(f, "Data Head:")?;
        self.write_rows(f, head)?;
        writeln!(f)?;
        writeln!(f, "Data Tail:")?;
        self.write_rows(f, tail)?;
        writeln!(f)?;
        writeln!(f, "{}", self.summary)?;
        writeln!(f)?;
        write!(f, "{}", self.info)
    }
}

fn format_price(price: Option<f64>) -> String {
    price.map_or_else(|| "n/a".to_string(), |p| format!("{:.2}", p))
}

fn format_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{:.3}", value)
    }
}

/// Quality of a linear fit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitAssessment {
    /// Squared correlation, rounded to 5 decimals
    pub r_squared: f64,
    /// Root mean squared error of the trendline
    pub rmse: f64,
}

impl FitAssessment {
    /// Assess `trend`
    pub fn new(trend: &TrendFit) -> Self {
        Self {
            r_squared: round_to(trend.fit().r_squared(), R_SQUARED_DECIMALS),
            rmse: trend.rmse(),
        }
    }

    /// Whether the fit is good enough to trust the prediction
    pub fn is_acceptable(&self) -> bool {
        self.r_squared > MIN_R_SQUARED && self.rmse < MAX_RMSE
    }
}

impl fmt::Display for FitAssessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "For a good model, the following should be true:")?;
        writeln!(f, "R-Squared > {} and RMSE < {}", MIN_R_SQUARED, MAX_RMSE)?;
        writeln!(f)?;
        writeln!(f, "R-Squared: {}", self.r_squared)?;
        writeln!(f, "RMSE: {}", self.rmse)?;
        if self.is_acceptable() {
            write!(f, "The model seems decent.")
        } else {
            writeln!(f, "Maybe you should not trust the prediction...")?;
            write!(
                f,
                "perhaps if you choose a shorter, more recent time frame, \
                 the linear regression results would improve."
            )
        }
    }
}

/// Predicted close at the target date and on the way there
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionReport {
    /// Business day the prediction is reported for
    pub target_date: NaiveDate,
    /// Predicted close
    pub value: f64,
    /// Prediction horizon
    pub days_ahead: usize,
    /// Predicted closes for each step up to the horizon
    pub series: Vec<f64>,
    /// Quality of the underlying fit
    pub assessment: FitAssessment,
}

impl fmt::Display for PredictionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Predicted Closing Price for {}:", self.target_date)?;
        writeln!(f, "{}", self.value)?;
        writeln!(
            f,
            "List of {} predicted values from selected End Date:",
            self.days_ahead
        )?;
        writeln!(f, "{:?}", self.series)?;
        writeln!(f)?;
        write!(f, "{}", self.assessment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use stock_math::fit_linear_trend;

    #[rstest]
    #[case(0.85, 2.0, true)]
    #[case(0.75, 2.0, false)]
    #[case(0.9, 25.0, false)]
    #[case(0.2, 1.0, false)]
    fn test_acceptance_thresholds(#[case] r_squared: f64, #[case] rmse: f64, #[case] ok: bool) {
        assert_eq!(FitAssessment { r_squared, rmse }.is_acceptable(), ok);
    }

    #[test]
    fn test_overview_shows_full_bars() {
        use market_data::{PriceBar, PriceSeries};

        let date = NaiveDate::from_ymd_opt(2020, 11, 23).unwrap();
        let bar = PriceBar {
            date,
            open: Some(117.18),
            high: Some(117.62),
            low: None,
            close: 113.85,
            volume: Some(127_959_300),
        };
        let series = AnalysedSeries::new(PriceSeries::new(vec![bar]));
        let info = TickerInfo::from_symbol("AAPL");
        let rendered = DataOverview::new(&series, &info).to_string();

        let header = rendered.lines().nth(3).unwrap();
        assert!(header.starts_with("Date"));
        assert!(header.contains("Open") && header.contains("High") && header.contains("Low"));

        let row = rendered.lines().nth(4).unwrap();
        let fields: Vec<&str> = row.split_whitespace().take(6).collect();
        assert_eq!(
            fields,
            vec!["2020-11-23", "117.18", "117.62", "n/a", "113.85", "127959300"]
        );
    }

    #[test]
    fn test_assessment_wording() {
        let good = FitAssessment {
            r_squared: 0.8,
            rmse: 3.2,
        };
        assert!(good.to_string().ends_with("The model seems decent."));
        assert!(good.to_string().contains("R-Squared: 0.8\n"));

        let bad = FitAssessment {
            r_squared: 0.1,
            rmse: 3.2,
        };
        assert!(bad
            .to_string()
            .contains("Maybe you should not trust the prediction..."));
    }

    #[test]
    fn test_assessment_of_perfect_line() {
        let closes: Vec<f64> = (0..30).map(|i| 10.0 + 0.5 * i as f64).collect();
        let assessment = FitAssessment::new(&fit_linear_trend(&closes));
        assert_eq!(assessment.r_squared, 1.0);
        assert!(assessment.rmse < 1e-9);
        assert!(assessment.is_acceptable());
    }

    #[test]
    fn test_prediction_report() {
        let report = PredictionReport {
            target_date: NaiveDate::from_ymd_opt(2020, 11, 30).unwrap(),
            value: 121.84,
            days_ahead: 2,
            series: vec![121.59, 121.84],
            assessment: FitAssessment {
                r_squared: 0.7225,
                rmse: 9.1,
            },
        };
        let rendered = report.to_string();
        assert!(rendered.starts_with("Predicted Closing Price for 2020-11-30:\n121.84\n"));
        assert!(rendered.contains("List of 2 predicted values from selected End Date:\n[121.59, 121.84]\n"));
    }
}
