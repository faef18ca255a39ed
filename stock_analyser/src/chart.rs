//! Chart data export
//!
//! A chart is a set of named columns aligned with a date axis. Charts are
//! written as CSV files that any plotting tool can pick up.

use crate::error::Result;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::info;

/// One named value column of a chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartColumn {
    /// Column header
    pub name: String,
    /// Values aligned with the chart dates, `NaN` where undefined
    pub values: Vec<f64>,
}

/// Columns plotted against a shared date axis
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    title: String,
    slug: String,
    dates: Vec<NaiveDate>,
    columns: Vec<ChartColumn>,
}

impl Chart {
    /// Create a chart without columns
    pub fn new(title: impl Into<String>, slug: impl Into<String>, dates: Vec<NaiveDate>) -> Self {
        Self {
            title: title.into(),
            slug: slug.into(),
            dates,
            columns: Vec::new(),
        }
    }

    /// Add a column. Columns shorter than the date axis are padded with `NaN`
    /// and longer ones are cut.
    pub fn with_column(mut self, name: impl Into<String>, mut values: Vec<f64>) -> Self {
        values.resize(self.dates.len(), f64::NAN);
        self.columns.push(ChartColumn {
            name: name.into(),
            values,
        });
        self
    }

    /// Chart title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// File name stem of the chart
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Date axis
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Value columns
    pub fn columns(&self) -> &[ChartColumn] {
        &self.columns
    }

    /// Look up a column by header
    pub fn column(&self, name: &str) -> Option<&ChartColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Write the chart to `<dir>/<ticker>_<slug>.csv`, creating `dir` if needed
    pub fn write_csv(&self, dir: impl AsRef<Path>, ticker: &str) -> Result<PathBuf> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}_{}.csv", ticker, self.slug));

        let mut writer = csv::Writer::from_path(&path)?;

        let mut header = vec!["Date".to_string()];
        header.extend(self.columns.iter().map(|c| c.name.clone()));
        writer.write_record(&header)?;

        for (i, date) in self.dates.iter().enumerate() {
            let mut record = vec![date.format("%Y-%m-%d").to_string()];
            record.extend(self.columns.iter().map(|c| format_cell(c.values[i])));
            writer.write_record(&record)?;
        }
        writer.flush()?;

        info!(chart = %self.title, path = %path.display(), rows = self.dates.len(), "wrote chart");
        Ok(path)
    }
}

/// Undefined values become empty cells
fn format_cell(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        value.to_string()
    }
}
