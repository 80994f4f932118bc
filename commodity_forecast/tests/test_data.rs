use commodity_forecast::{ForecastError, HistoricalSeries, PriceRecord, SeriesLoader};
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_series_loader_from_csv() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "date,price").unwrap();
    writeln!(file, "2023-01-03,108.0").unwrap();
    writeln!(file, "2023-01-01,103.0").unwrap();
    writeln!(file, "2023-01-02,106.0").unwrap();

    let records = SeriesLoader::from_csv(file.path()).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0], PriceRecord::new("2023-01-03", 108.0));

    let series = HistoricalSeries::from_records(&records).unwrap();
    assert_eq!(series.prices(), vec![103.0, 106.0, 108.0]);
    assert_eq!(series.day_offsets(), vec![0, 1, 2]);
}

#[test]
fn test_csv_with_extra_columns() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "commodity,date,price,unit").unwrap();
    writeln!(file, "maize,2023-01-01,3200,90kg bag").unwrap();
    writeln!(file, "maize,2023-01-08,3350,90kg bag").unwrap();

    let records = SeriesLoader::from_csv(file.path()).unwrap();
    assert_eq!(
        records,
        vec![
            PriceRecord::new("2023-01-01", 3200.0),
            PriceRecord::new("2023-01-08", 3350.0),
        ]
    );
}

#[test]
fn test_series_loader_error_handling() {
    // Test with non-existent file
    let result = SeriesLoader::from_csv("nonexistent_file.csv");
    assert!(matches!(result, Err(ForecastError::Io(_))));

    // Test with missing price column
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "date,cost").unwrap();
    writeln!(file, "2023-01-01,100").unwrap();
    let result = SeriesLoader::from_csv(file.path());
    assert!(matches!(result, Err(ForecastError::Csv(_))));

    // Test with broken JSON
    let result = SeriesLoader::from_json_str(r#"[{"date":"2023-01-01"}]"#);
    assert!(matches!(result, Err(ForecastError::Json(_))));
}

#[test]
fn test_series_rejects_bad_record() {
    let records = vec![
        PriceRecord::new("2023-01-01", 100.0),
        PriceRecord::new("2023-02-30", 101.0),
    ];
    let result = HistoricalSeries::from_records(&records);

    assert!(matches!(result, Err(ForecastError::MalformedInput(_))));
}
