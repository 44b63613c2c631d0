use serde_json::Value;
use wtd_atr::{AtrError, TimeSeries, atr_series};

// Shape of a World Trading Data history reply, keys deliberately out of order.
const UKX_SAMPLE: &str = r#"{"name":"UKX","history":{
    "2018-10-16":{"open":"7029.22","close":"7059.40","high":"7062.08","low":"6998.93","volume":"0"},
    "2018-10-12":{"open":"6995.87","close":"6995.91","high":"7029.22","low":"6927.68","volume":"0"},
    "2018-10-15":{"open":"6995.91","close":"7029.22","high":"7050.00","low":"6958.68","volume":"0"}
}}"#;

/// 20 weekdays with ascending highs, emitted newest first.
fn rising_payload() -> String {
    let mut entries = Vec::new();
    let start = chrono::NaiveDate::from_ymd_opt(2018, 9, 3).unwrap();
    let mut date = start;
    let mut i = 0;
    while i < 20 {
        if chrono::Datelike::weekday(&date).number_from_monday() <= 5 {
            entries.push(format!(
                r#""{}":{{"open":"105","high":"{}","low":"100","close":"105","volume":"{}"}}"#,
                date.format("%Y-%m-%d"),
                110 + i,
                1000 + i
            ));
            i += 1;
        }
        date = date.succ_opt().unwrap();
    }
    entries.reverse();
    format!(r#"{{"name":"TEST","history":{{{}}}}}"#, entries.join(","))
}

#[test]
fn test_ukx_sample_from_docs() {
    let value: Value = serde_json::from_str(UKX_SAMPLE).expect("UKX sample should be valid JSON");
    assert_eq!(value["name"], "UKX");
    assert!(value["history"].is_object());
    assert_eq!(value["history"]["2018-10-16"]["close"], "7059.40");
}

#[test]
fn test_ukx_sample_loads_in_date_order() {
    let series = TimeSeries::from_json(UKX_SAMPLE).expect("UKX sample should load");
    let dates: Vec<String> = series
        .candles()
        .iter()
        .map(|c| c.get_date().to_string())
        .collect();
    assert_eq!(dates, vec!["2018-10-12", "2018-10-15", "2018-10-16"]);
}

#[test]
fn test_ukx_sample_true_range() {
    let series = TimeSeries::from_json(UKX_SAMPLE).unwrap();
    let rows = atr_series(series.candles(), None);

    assert_eq!(rows.len(), 3);
    // 2018-10-16 against 2018-10-15: max(63.15, |6998.93 - 7029.22|) = 63.15
    let last = &rows[2];
    assert!((last.th_tl - 63.15).abs() < 1e-9);
    assert!((last.tl_yc.unwrap() - 30.29).abs() < 1e-9);
    assert!((last.true_range.unwrap() - 63.15).abs() < 1e-9);
    assert!(rows.iter().all(|r| r.atr.is_none()));
}

#[test]
fn test_gapped_series_atr_window() {
    let series = TimeSeries::from_json(&rising_payload()).unwrap();
    assert_eq!(series.len(), 20);

    let rows = atr_series(series.candles(), None);
    for (i, row) in rows.iter().enumerate() {
        assert_eq!(row.atr.is_some(), i >= 13, "row {}", i);
    }
    // Window 0..=13 holds TR 10..=23
    assert_eq!(rows[13].atr, Some(16.5));
    assert_eq!(rows[0].candle.get_volume(), 1000);
}

#[test]
fn test_empty_history_yields_empty_table() {
    let series = TimeSeries::from_json(r#"{"name":"UKX","history":{}}"#).unwrap();
    assert!(atr_series(series.candles(), None).is_empty());
}

#[test]
fn test_provider_error_reply_is_malformed() {
    let reply = r#"{"Message":"Error! The requested stock(s) could not be found."}"#;
    assert!(matches!(
        TimeSeries::from_json(reply),
        Err(AtrError::MalformedResponse(_))
    ));
}
