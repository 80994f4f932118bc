//! Historical price series handling for forecasting

use crate::error::{ForecastError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Date-time layouts accepted alongside plain `%Y-%m-%d` dates
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// A raw `{date, price}` row as handed over by the storage layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// Date of the price, `%Y-%m-%d` or a date-time
    pub date: String,
    /// Observed price
    pub price: f64,
}

impl PriceRecord {
    /// Create a new record
    pub fn new(date: impl Into<String>, price: f64) -> Self {
        Self {
            date: date.into(),
            price,
        }
    }
}

/// A single validated price observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PriceRecord")]
pub struct Observation {
    date: NaiveDate,
    price: f64,
}

impl Observation {
    /// Create an observation, rejecting non-finite and non-positive prices
    pub fn new(date: NaiveDate, price: f64) -> Result<Self> {
        if !price.is_finite() || price <= 0.0 {
            return Err(ForecastError::MalformedInput(format!(
                "Price on {} must be a positive number, got {}",
                date, price
            )));
        }

        Ok(Self { date, price })
    }

    /// Parse an observation from a date string and a price
    pub fn parse(date: &str, price: f64) -> Result<Self> {
        Self::new(parse_date(date)?, price)
    }

    /// Calendar date of the observation
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Observed price
    pub fn price(&self) -> f64 {
        self.price
    }
}

impl TryFrom<PriceRecord> for Observation {
    type Error = ForecastError;

    fn try_from(record: PriceRecord) -> Result<Self> {
        Self::parse(&record.date, record.price)
    }
}

impl TryFrom<&PriceRecord> for Observation {
    type Error = ForecastError;

    fn try_from(record: &PriceRecord) -> Result<Self> {
        Self::parse(&record.date, record.price)
    }
}

/// Parse a calendar date, dropping the time of day when one is present
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(datetime.date());
        }
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(input) {
        return Ok(datetime.date_naive());
    }

    Err(ForecastError::MalformedInput(format!(
        "Unrecognized date: {:?}",
        input
    )))
}

/// Observations of one commodity, sorted ascending by date.
///
/// Sorting is stable, so observations sharing a date keep their input order.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalSeries {
    observations: Vec<Observation>,
}

impl HistoricalSeries {
    /// Build a sorted series from a private copy of the observations
    pub fn from_observations(observations: &[Observation]) -> Self {
        let mut observations = observations.to_vec();
        observations.sort_by_key(|o| o.date);
        Self { observations }
    }

    /// Parse raw records and build a sorted series
    pub fn from_records(records: &[PriceRecord]) -> Result<Self> {
        let observations = records
            .iter()
            .map(Observation::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::from_observations(&observations))
    }

    /// Get the number of observations
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Check if the series is empty
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// The sorted observations
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Earliest date, the origin of the day-offset axis
    pub fn origin(&self) -> Option<NaiveDate> {
        self.observations.first().map(|o| o.date)
    }

    /// Chronologically last observation; among equal dates, the last one supplied
    pub fn last(&self) -> Option<&Observation> {
        self.observations.last()
    }

    /// Whole days between the origin and each observation
    pub fn day_offsets(&self) -> Vec<i64> {
        let Some(origin) = self.origin() else {
            return Vec::new();
        };

        self.observations
            .iter()
            .map(|o| (o.date - origin).num_days())
            .collect()
    }

    /// Observed prices in date order
    pub fn prices(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.price).collect()
    }
}

/// Loader for raw price records
#[derive(Debug)]
pub struct SeriesLoader;

impl SeriesLoader {
    /// Load records from a CSV file with `date` and `price` columns
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Vec<PriceRecord>> {
        let file = File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// Load records from any CSV source with `date` and `price` columns
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Vec<PriceRecord>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for record in reader.deserialize() {
            records.push(record?);
        }

        Ok(records)
    }

    /// Load records from a JSON file holding an array of `{date, price}` objects
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Vec<PriceRecord>> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }

    /// Parse records from a JSON string holding an array of `{date, price}` objects
    pub fn from_json_str(json: &str) -> Result<Vec<PriceRecord>> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load records, picking JSON for `.json` files and CSV otherwise
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<PriceRecord>> {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json(path)
        } else {
            Self::from_csv(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[rstest]
    #[case("2024-01-05")]
    #[case(" 2024-01-05 ")]
    #[case("2024-01-05 13:45:00")]
    #[case("2024-01-05T13:45:00")]
    #[case("2024-01-05T13:45:00.250")]
    #[case("2024-01-05T13:45:00+03:00")]
    fn test_parse_date_formats(#[case] input: &str) {
        assert_eq!(parse_date(input).unwrap(), date("2024-01-05"));
    }

    #[rstest]
    #[case("")]
    #[case("05/01/2024")]
    #[case("2024-13-01")]
    #[case("yesterday")]
    fn test_parse_date_rejects_garbage(#[case] input: &str) {
        assert!(matches!(
            parse_date(input),
            Err(ForecastError::MalformedInput(_))
        ));
    }

    #[rstest]
    #[case(0.0)]
    #[case(-3.5)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn test_observation_rejects_bad_price(#[case] price: f64) {
        assert!(Observation::new(date("2024-01-01"), price).is_err());
    }

    #[test]
    fn test_series_sorts_stably() {
        let observations = vec![
            Observation::parse("2024-01-03", 3.0).unwrap(),
            Observation::parse("2024-01-01", 1.0).unwrap(),
            Observation::parse("2024-01-03", 4.0).unwrap(),
            Observation::parse("2024-01-02", 2.0).unwrap(),
        ];
        let series = HistoricalSeries::from_observations(&observations);

        assert_eq!(series.prices(), vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(series.day_offsets(), vec![0, 1, 2, 2]);
        assert_eq!(series.origin(), Some(date("2024-01-01")));
        assert_eq!(series.last().map(|o| o.price()), Some(4.0));
        // The caller's slice is untouched
        assert_eq!(observations[0].price(), 3.0);
    }

    #[test]
    fn test_day_offsets_follow_calendar_gaps() {
        let records = vec![
            PriceRecord::new("2024-02-27", 10.0),
            PriceRecord::new("2024-03-01", 11.0),
            PriceRecord::new("2024-03-31", 12.0),
        ];
        let series = HistoricalSeries::from_records(&records).unwrap();

        assert_eq!(series.day_offsets(), vec![0, 3, 33]);
    }

    #[test]
    fn test_empty_series() {
        let series = HistoricalSeries::from_observations(&[]);

        assert!(series.is_empty());
        assert_eq!(series.origin(), None);
        assert!(series.day_offsets().is_empty());
    }

    #[test]
    fn test_observation_deserializes_through_validation() {
        let ok: Observation = serde_json::from_str(r#"{"date":"2024-01-01","price":12.5}"#).unwrap();
        assert_eq!(ok.date(), date("2024-01-01"));

        let bad = serde_json::from_str::<Observation>(r#"{"date":"2024-01-01","price":-1}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_csv_reader() {
        let csv = "date,price\n2024-01-01, 100.5\n2024-01-02,101\n";
        let records = SeriesLoader::from_csv_reader(csv.as_bytes()).unwrap();

        assert_eq!(
            records,
            vec![
                PriceRecord::new("2024-01-01", 100.5),
                PriceRecord::new("2024-01-02", 101.0),
            ]
        );
    }

    #[test]
    fn test_csv_reader_rejects_non_numeric_price() {
        let csv = "date,price\n2024-01-01,cheap\n";
        let result = SeriesLoader::from_csv_reader(csv.as_bytes());

        assert!(matches!(result, Err(ForecastError::Csv(_))));
    }

    #[test]
    fn test_json_records() {
        let json = r#"[{"date":"2024-01-01","price":100.0},{"date":"2024-01-02 08:00:00","price":99.5}]"#;
        let records = SeriesLoader::from_json_str(json).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].date, "2024-01-02 08:00:00");
    }
}
