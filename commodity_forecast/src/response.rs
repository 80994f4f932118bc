//! Forecast values and the JSON payload handed to the chart frontend

use crate::error::{ForecastError, Result, INSUFFICIENT_DATA_MESSAGE};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Whether the forecast ends above the last observed price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    /// Final forecast strictly above the last observed price
    Up,
    /// Final forecast at or below the last observed price
    Down,
}

impl TrendDirection {
    /// Compare the final forecast with the last observed price. Ties are `Down`.
    pub fn from_prices(final_forecast: f64, last_observed: f64) -> Self {
        if final_forecast > last_observed {
            TrendDirection::Up
        } else {
            TrendDirection::Down
        }
    }
}

impl Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendDirection::Up => f.write_str("up"),
            TrendDirection::Down => f.write_str("down"),
        }
    }
}

/// A dated short-horizon forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Consecutive days following the last observation
    pub future_dates: Vec<NaiveDate>,
    /// Predicted price for each date, rounded to cents
    pub predicted_prices: Vec<f64>,
    /// Direction of the final prediction against the last observed price
    pub trend_direction: TrendDirection,
}

impl Forecast {
    /// Create a forecast, checking that dates and prices line up
    pub fn new(
        future_dates: Vec<NaiveDate>,
        predicted_prices: Vec<f64>,
        trend_direction: TrendDirection,
    ) -> Result<Self> {
        if future_dates.len() != predicted_prices.len() {
            return Err(ForecastError::InvalidParameter(format!(
                "Dates length ({}) doesn't match prices length ({})",
                future_dates.len(),
                predicted_prices.len()
            )));
        }

        Ok(Self {
            future_dates,
            predicted_prices,
            trend_direction,
        })
    }

    /// Number of days forecast
    pub fn horizon(&self) -> usize {
        self.future_dates.len()
    }

    /// Dates formatted as `%Y-%m-%d`
    pub fn date_labels(&self) -> Vec<String> {
        self.future_dates
            .iter()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .collect()
    }
}

/// Payload returned to the web layer: a forecast or an error marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ForecastResponse {
    Forecast(Forecast),
    Error { error: String },
}

impl ForecastResponse {
    /// Error payload for a series that is too short
    pub fn insufficient_data() -> Self {
        ForecastResponse::Error {
            error: INSUFFICIENT_DATA_MESSAGE.to_string(),
        }
    }

    /// Turn an engine result into a payload.
    ///
    /// Only insufficient data becomes an error payload; every other failure
    /// is handed back to the caller.
    pub fn from_result(result: Result<Forecast>) -> Result<Self> {
        match result {
            Ok(forecast) => Ok(ForecastResponse::Forecast(forecast)),
            Err(e) if e.is_insufficient_data() => Ok(Self::insufficient_data()),
            Err(e) => Err(e),
        }
    }

    /// Check whether this is the error payload
    pub fn is_error(&self) -> bool {
        matches!(self, ForecastResponse::Error { .. })
    }

    /// The forecast, if there is one
    pub fn forecast(&self) -> Option<&Forecast> {
        match self {
            ForecastResponse::Forecast(forecast) => Some(forecast),
            ForecastResponse::Error { .. } => None,
        }
    }

    /// The error message, if this is the error payload
    pub fn error_message(&self) -> Option<&str> {
        match self {
            ForecastResponse::Forecast(_) => None,
            ForecastResponse::Error { error } => Some(error),
        }
    }

    /// Serialize the payload to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize the payload to indented JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl From<Forecast> for ForecastResponse {
    fn from(forecast: Forecast) -> Self {
        ForecastResponse::Forecast(forecast)
    }
}
