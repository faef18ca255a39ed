use chrono::NaiveDate;
use market_data::{DataError, DataLoader, PriceSeries};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_data_loader_from_csv() {
    // Create a temporary CSV file
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Date,Open,High,Low,Close,Adj Close,Volume").unwrap();
    writeln!(file, "2023-01-03,100.0,105.0,98.0,103.0,102.1,1000").unwrap();
    writeln!(file, "2023-01-04,103.0,107.0,101.0,106.0,105.2,1200").unwrap();
    writeln!(file, "2023-01-05,106.0,110.0,104.0,108.0,107.3,1500").unwrap();

    let series = DataLoader::from_csv(file.path()).unwrap();

    assert_eq!(series.len(), 3);
    assert!(!series.is_empty());
    // The adjusted close drives the series
    assert_eq!(series.closes(), vec![102.1, 105.2, 107.3]);
    assert!(series.has_volume());
}

#[rstest]
#[case("Date,Close\n2023-01-03,103.0\n", 103.0)]
#[case("Date,Close,Adj Close\n2023-01-03,103.0,102.1\n", 102.1)]
#[case("date,adjclose\n2023-01-03,102.1\n", 102.1)]
#[case("timestamp,price\n2023-01-03T16:00:00,99.5\n", 99.5)]
fn test_close_column_detection(#[case] csv: &str, #[case] expected: f64) {
    let series = DataLoader::from_reader(csv.as_bytes()).unwrap();
    assert_eq!(series.closes(), vec![expected]);
}

#[test]
fn test_series_range_filter() {
    let dates: Vec<NaiveDate> = ["2023-01-02", "2023-01-03", "2023-01-04", "2023-01-05"]
        .into_iter()
        .map(|s| s.parse().unwrap())
        .collect();
    let series = PriceSeries::from_closes(dates, vec![1.0, 2.0, 3.0, 4.0]).unwrap();

    let subset = series.between(
        NaiveDate::from_ymd_opt(2023, 1, 3).unwrap(),
        NaiveDate::from_ymd_opt(2023, 1, 5).unwrap(),
    );
    assert_eq!(subset.closes(), vec![2.0, 3.0]);
}

#[test]
fn test_data_loader_error_handling() {
    // Test with non-existent file
    let result = DataLoader::from_csv("nonexistent_file.csv");
    assert!(matches!(result, Err(DataError::Io(_))));

    // Test with a header that has no price column
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "date,ticker,sector").unwrap();
    writeln!(file, "2023-01-03,AAPL,tech").unwrap();

    let result = DataLoader::from_csv(file.path());
    assert!(matches!(result, Err(DataError::MissingColumn(_))));
}
