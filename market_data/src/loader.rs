//! CSV loading of daily price data

use crate::error::{DataError, Result};
use crate::series::{PriceBar, PriceSeries};
use chrono::NaiveDate;
use csv::StringRecord;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Data loader for daily price files
#[derive(Debug)]
pub struct DataLoader;

/// Positions of the recognised columns in a CSV header
#[derive(Debug, Clone, Copy)]
struct ColumnLayout {
    date: usize,
    close: Option<usize>,
    adj_close: Option<usize>,
    open: Option<usize>,
    high: Option<usize>,
    low: Option<usize>,
    volume: Option<usize>,
}

impl DataLoader {
    /// Load a price series from a CSV file with a header row
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<PriceSeries> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let series = Self::from_reader(file)?;
        info!(path = %path.display(), rows = series.len(), "loaded price csv");
        Ok(series)
    }

    /// Load a price series from any CSV source with a header row
    ///
    /// When the file carries an adjusted close, it becomes the close and
    /// open, high and low are scaled by the same factor. Rows without a
    /// close are skipped.
    pub fn from_reader<R: Read>(reader: R) -> Result<PriceSeries> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let layout = Self::detect_columns(reader.headers()?)?;

        let mut bars = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            // header is line 1
            let line = index + 2;

            let raw_close = parse_price(&record, layout.close, line)?;
            let adj_close = parse_price(&record, layout.adj_close, line)?;
            let Some(close) = adj_close.or(raw_close) else {
                debug!(line, "skipping row without close");
                continue;
            };
            let factor = match raw_close {
                Some(raw) if raw != 0.0 => close / raw,
                _ => 1.0,
            };
            let scaled = |column| -> Result<Option<f64>> {
                Ok(parse_price(&record, column, line)?.map(|p| p * factor))
            };

            bars.push(PriceBar {
                date: parse_date(record.get(layout.date).unwrap_or_default(), line)?,
                open: scaled(layout.open)?,
                high: scaled(layout.high)?,
                low: scaled(layout.low)?,
                close,
                volume: parse_volume(&record, layout.volume, line)?,
            });
        }

        Ok(PriceSeries::new(bars))
    }

    /// Detect the date, price and volume columns from the header names
    fn detect_columns(headers: &StringRecord) -> Result<ColumnLayout> {
        let names: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();
        let find = |needle: &str| names.iter().position(|name| name.contains(needle));

        let date = find("date")
            .or_else(|| find("time"))
            .ok_or_else(|| DataError::MissingColumn("date".to_string()))?;

        let is_adjusted = |name: &String| name.contains("adj") && name.contains("close");
        let adj_close = names.iter().position(is_adjusted);
        let close = names
            .iter()
            .position(|name| name == "close")
            .or_else(|| {
                names
                    .iter()
                    .position(|name| name.contains("close") && !is_adjusted(name))
            })
            .or_else(|| find("price"));

        if close.is_none() && adj_close.is_none() {
            return Err(DataError::MissingColumn("close".to_string()));
        }

        Ok(ColumnLayout {
            date,
            close,
            adj_close,
            open: find("open"),
            high: find("high"),
            low: find("low"),
            volume: find("vol"),
        })
    }
}

/// Parse a date, ignoring any time-of-day suffix
fn parse_date(field: &str, line: usize) -> Result<NaiveDate> {
    let day = field.get(..10).unwrap_or(field);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|e| DataError::Parse(format!("line {}: invalid date '{}': {}", line, field, e)))
}

fn parse_price(record: &StringRecord, column: Option<usize>, line: usize) -> Result<Option<f64>> {
    let Some(field) = column.and_then(|c| record.get(c)).filter(|f| !f.is_empty()) else {
        return Ok(None);
    };

    field
        .parse::<f64>()
        .map(Some)
        .map_err(|e| DataError::Parse(format!("line {}: invalid price '{}': {}", line, field, e)))
}

/// Volumes are whole shares but some exports write them as floats
fn parse_volume(record: &StringRecord, column: Option<usize>, line: usize) -> Result<Option<u64>> {
    let Some(field) = column.and_then(|c| record.get(c)).filter(|f| !f.is_empty()) else {
        return Ok(None);
    };

    if let Ok(volume) = field.parse::<u64>() {
        return Ok(Some(volume));
    }

    match field.parse::<f64>() {
        Ok(volume) if volume >= 0.0 => Ok(Some(volume.round() as u64)),
        _ => Err(DataError::Parse(format!(
            "line {}: invalid volume '{}'",
            line, field
        ))),
    }
}
