use chrono::NaiveDate;
use market_data::yahoo::{parse_chart_response, YahooClient};
use market_data::DataError;
use pretty_assertions::assert_eq;
use rstest::rstest;

const CHART_RESPONSE: &str = r#"{
  "chart": {
    "result": [{
      "meta": {
        "currency": "USD",
        "symbol": "AAPL",
        "shortName": "Apple Inc.",
        "longName": "Apple Inc.",
        "regularMarketPrice": 113.85,
        "fiftyTwoWeekHigh": 137.98,
        "fiftyTwoWeekLow": 53.15,
        "chartPreviousClose": 117.34,
        "gmtoffset": -18000
      },
      "timestamp": [1606141800, 1606228200, 1606314600],
      "indicators": {
        "quote": [{
          "open": [117.18, 113.91, 115.55],
          "high": [117.62, 115.85, 116.75],
          "low": [113.75, 112.59, 115.17],
          "close": [113.85, 115.17, null],
          "volume": [127959300, 113874200, null]
        }],
        "adjclose": [{ "adjclose": [111.9, 113.2, null] }]
      }
    }],
    "error": null
  }
}"#;

#[test]
fn test_parse_chart_response() {
    let history = parse_chart_response(CHART_RESPONSE, "aapl").unwrap();

    // The third row has no close and is dropped
    assert_eq!(history.series.len(), 2);
    // Closes are split and dividend adjusted
    assert_eq!(history.series.closes(), vec![111.9, 113.2]);
    assert_eq!(
        history.series.dates(),
        vec![
            NaiveDate::from_ymd_opt(2020, 11, 23).unwrap(),
            NaiveDate::from_ymd_opt(2020, 11, 24).unwrap(),
        ]
    );
    assert_eq!(history.series.bars()[0].volume, Some(127_959_300));
    assert_eq!(history.series.bars()[1].volume, Some(113_874_200));

    // Open, high and low are scaled by the adjustment factor of their row
    let bar = &history.series.bars()[1];
    let factor = 113.2 / 115.17;
    assert!((bar.open.unwrap() - 113.91 * factor).abs() < 1e-9);
    assert!((bar.high.unwrap() - 115.85 * factor).abs() < 1e-9);
    assert!((bar.low.unwrap() - 112.59 * factor).abs() < 1e-9);

    assert_eq!(history.info.symbol, "AAPL");
    assert_eq!(history.info.company_name(), "Apple Inc.");
    assert_eq!(history.info.fifty_two_week_low, Some(53.15));
    assert_eq!(history.info.previous_close, Some(117.34));
    assert_eq!(history.info.currency.as_deref(), Some("USD"));
}

#[test]
fn test_missing_adjusted_close_keeps_raw_prices() {
    let body = r#"{"chart":{"result":[{"meta":{"symbol":"X"},"timestamp":[1606141800],
        "indicators":{"quote":[{"open":[9.5],"close":[10.0]}]}}],"error":null}}"#;
    let history = parse_chart_response(body, "X").unwrap();
    assert_eq!(history.series.closes(), vec![10.0]);
    assert_eq!(history.series.bars()[0].open, Some(9.5));
}

#[rstest]
// New York session open, 14:30 UTC
#[case(1606141800, -18000, (2020, 11, 23))]
// Auckland session open, 21:00 UTC the previous day
#[case(1606078800, 46800, (2020, 11, 23))]
// No offset reported: UTC
#[case(1606078800, 0, (2020, 11, 22))]
fn test_bars_are_dated_in_exchange_time(
    #[case] timestamp: i64,
    #[case] gmtoffset: i64,
    #[case] expected: (i32, u32, u32),
) {
    let body = format!(
        r#"{{"chart":{{"result":[{{"meta":{{"symbol":"X","gmtoffset":{}}},"timestamp":[{}],
            "indicators":{{"quote":[{{"close":[1.0]}}]}}}}],"error":null}}}}"#,
        gmtoffset, timestamp
    );
    let history = parse_chart_response(&body, "X").unwrap();
    assert_eq!(
        history.series.dates(),
        vec![NaiveDate::from_ymd_opt(expected.0, expected.1, expected.2).unwrap()]
    );
}

#[test]
fn test_unknown_ticker() {
    let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
    let error = parse_chart_response(body, "ZZZZ").unwrap_err();
    assert!(matches!(error, DataError::UnknownTicker(ref t) if t == "ZZZZ"));
}

#[test]
fn test_api_error() {
    let body = r#"{"chart":{"result":null,"error":{"code":"Bad Request","description":"Data doesn't exist for startDate = 1, endDate = 2"}}}"#;
    let error = parse_chart_response(body, "AAPL").unwrap_err();
    assert!(matches!(error, DataError::Api { ref code, .. } if code == "Bad Request"));
}

#[test]
fn test_empty_range() {
    // The endpoint omits timestamps when nothing traded in the range
    let body = r#"{"chart":{"result":[{"meta":{"symbol":"AAPL"},"indicators":{"quote":[{}]}}],"error":null}}"#;
    let history = parse_chart_response(body, "AAPL").unwrap();
    assert!(history.series.is_empty());
    assert_eq!(history.info.company_name(), "AAPL");

    let body = r#"{"chart":{"result":[],"error":null}}"#;
    assert!(matches!(parse_chart_response(body, "AAPL"), Err(DataError::NoData)));
}

#[test]
fn test_malformed_body() {
    let error = parse_chart_response("<html>Too Many Requests</html>", "AAPL").unwrap_err();
    assert!(matches!(error, DataError::Json(_)));
}

#[test]
#[ignore] // Requires network access
fn test_fetch_aapl_daily() {
    let client = YahooClient::with_defaults().unwrap();
    let history = client
        .fetch_history(
            "AAPL",
            NaiveDate::from_ymd_opt(2019, 11, 23).unwrap(),
            NaiveDate::from_ymd_opt(2020, 11, 23).unwrap(),
        )
        .expect("Failed to fetch AAPL data");

    assert_eq!(history.series.len(), 251);
    assert!(history.series.has_volume());
}
