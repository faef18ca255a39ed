use chrono::{Duration, NaiveDate};
use pretty_assertions::assert_eq;
use std::io::Write;
use stock_analyser::{Analyser, AnalyserError, AnalysisKind, AnalysisRequest};
use tempfile::{tempdir, NamedTempFile};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Weekday closes from 2020-01-01 on a gentle uptrend with a wobble
fn price_csv(days: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Date,Open,High,Low,Close,Adj Close,Volume").unwrap();

    let mut day = date(2020, 1, 1);
    let mut written = 0;
    while written < days {
        if chrono::Datelike::weekday(&day).number_from_monday() <= 5 {
            let close = 100.0 + written as f64 * 0.25 + (written as f64 * 0.7).sin();
            writeln!(
                file,
                "{},{:.2},{:.2},{:.2},{:.2},{:.2},{}",
                day,
                close - 0.5,
                close + 1.0,
                close - 1.0,
                close,
                close * 0.98,
                1_000_000 + written * 1000
            )
            .unwrap();
            written += 1;
        }
        day += Duration::days(1);
    }
    file
}

fn request(start: NaiveDate, end: NaiveDate, days: i64) -> AnalysisRequest {
    AnalysisRequest::new("demo", start, end, days).unwrap()
}

#[test]
fn test_csv_source_is_filtered_by_range() {
    let file = price_csv(300);

    let full = Analyser::from_csv(request(date(2019, 1, 1), date(2022, 1, 1), 5), file.path()).unwrap();
    assert_eq!(full.series().len(), 300);
    assert_eq!(full.company_name(), "DEMO");

    // End date is exclusive
    let january = Analyser::from_csv(request(date(2020, 1, 1), date(2020, 1, 31), 5), file.path()).unwrap();
    assert_eq!(january.series().len(), 22);
    assert_eq!(
        january.series().prices().last().unwrap().date,
        date(2020, 1, 30)
    );
}

#[test]
fn test_range_without_rows() {
    let file = price_csv(10);
    let result = Analyser::from_csv(request(date(2021, 1, 1), date(2021, 2, 1), 5), file.path());
    assert!(matches!(result, Err(AnalyserError::Data(_))));
}

#[test]
fn test_all_analyses_export_charts() {
    let file = price_csv(260);
    let analyser =
        Analyser::from_csv(request(date(2020, 1, 1), date(2021, 6, 1), 10), file.path()).unwrap();
    let out = tempdir().unwrap();

    let mut written = Vec::new();
    for kind in AnalysisKind::all() {
        let output = analyser.run(kind);
        if let Some(chart) = output.chart {
            let path = chart.write_csv(out.path(), analyser.request().ticker()).unwrap();
            written.push(path.file_name().unwrap().to_string_lossy().into_owned());
        }
    }
    written.sort();

    assert_eq!(
        written,
        vec![
            "DEMO_linear_trend.csv",
            "DEMO_macd.csv",
            "DEMO_moving_average_cross.csv",
            "DEMO_price_volume.csv",
            "DEMO_weighted_ma_vs_close.csv",
        ]
    );

    let cross = std::fs::read_to_string(out.path().join("DEMO_moving_average_cross.csv")).unwrap();
    let mut lines = cross.lines();
    assert_eq!(
        lines.next().unwrap(),
        "Date,Short Term MA (50d),Long Term MA (200d)"
    );
    // Neither window is full on the first row
    assert_eq!(lines.next().unwrap(), "2020-01-01,,");
    assert_eq!(cross.lines().count(), 261);
}

#[test]
fn test_reports() {
    let file = price_csv(120);
    let analyser =
        Analyser::from_csv(request(date(2020, 1, 1), date(2021, 1, 1), 5), file.path()).unwrap();

    let overview = analyser.run(AnalysisKind::DataOverview).report.unwrap();
    assert!(overview.starts_with("DEMO DATA SUMMARY"));
    assert!(overview.contains("Data Head:"));
    assert!(overview.contains("Data Tail:"));
    assert!(overview.contains("Closing Price Summary"));
    assert!(overview.contains(" DEMO Overview "));

    let prediction = analyser.prediction();
    assert_eq!(prediction.series.len(), 5);
    assert_eq!(prediction.series.last().copied(), Some(prediction.value));
    // 2021-01-01 + 5 days is a Wednesday
    assert_eq!(prediction.target_date, date(2021, 1, 6));

    let text = analyser.run(AnalysisKind::Prediction).report.unwrap();
    assert!(text.starts_with("Predicted Closing Price for 2021-01-06:"));
    assert!(text.contains("R-Squared > 0.75 and RMSE < 25"));
}

#[test]
fn test_summary() {
    let file = price_csv(30);
    let analyser =
        Analyser::from_csv(request(date(2020, 1, 1), date(2020, 11, 23), 5), file.path()).unwrap();
    assert_eq!(
        analyser.summary().to_string(),
        "DEMO\n\nTicker DEMO\nStart Date: 2020-01-01\nEnd  Date: 2020-11-23\n\
         Day(s) in the Future: 5 -> bd 2020-11-30"
    );
}
