//! Forecast engine: from a price history to a dated forecast
//!
//! A call runs the same steps every time:
//!
//! 1. refuse series shorter than the observation floor
//! 2. stable-sort a private copy of the observations by date
//! 3. map each date to whole days since the earliest date
//! 4. fit the regressor on `(day offset, price)`
//! 5. predict the `horizon` days after the last observation
//! 6. label the trend against the last observed price, then round to cents
//!
//! The engine holds no mutable state and every call fits its own model, so a
//! single engine can serve concurrent callers.

use crate::config::{ForecastConfig, DEFAULT_HORIZON, MIN_OBSERVATIONS};
use crate::error::{ForecastError, Result};
use crate::metrics::{evaluate_fit, FitMetrics};
use crate::models::{AnyRegressor, FittedRegressor, PriceRegressor, TrendForestRegressor};
use crate::response::{Forecast, ForecastResponse, TrendDirection};
use crate::series::{HistoricalSeries, Observation, PriceRecord};
use chrono::{Days, NaiveDate};
use forecast_math::MathError;
use tracing::{debug, instrument};

/// Short-horizon price forecaster over a pluggable regressor
#[derive(Debug, Clone)]
pub struct ForecastEngine<R: PriceRegressor = AnyRegressor> {
    regressor: R,
    min_observations: usize,
    default_horizon: usize,
}

impl ForecastEngine<AnyRegressor> {
    /// Engine with the default trend forest, 7-day horizon and 5-observation floor
    pub fn new() -> Self {
        Self::with_regressor(AnyRegressor::TrendForest(TrendForestRegressor::default()))
    }

    /// Engine built from validated settings
    pub fn from_config(config: &ForecastConfig) -> Result<Self> {
        config.validate()?;
        let regressor = AnyRegressor::new(config.model, config.forest)?;

        Self::with_regressor(regressor)
            .with_min_observations(config.min_observations)?
            .with_default_horizon(config.horizon)
    }
}

impl Default for ForecastEngine<AnyRegressor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: PriceRegressor> ForecastEngine<R> {
    /// Engine over a specific regressor with the default floor and horizon
    pub fn with_regressor(regressor: R) -> Self {
        Self {
            regressor,
            min_observations: MIN_OBSERVATIONS,
            default_horizon: DEFAULT_HORIZON,
        }
    }

    /// Raise the observation floor. It can never drop below 5.
    pub fn with_min_observations(mut self, min_observations: usize) -> Result<Self> {
        if min_observations < MIN_OBSERVATIONS {
            return Err(ForecastError::InvalidParameter(format!(
                "Minimum observations must be at least {}",
                MIN_OBSERVATIONS
            )));
        }

        self.min_observations = min_observations;
        Ok(self)
    }

    /// Change the horizon used when a caller does not give one
    pub fn with_default_horizon(mut self, horizon: usize) -> Result<Self> {
        check_horizon(horizon)?;
        self.default_horizon = horizon;
        Ok(self)
    }

    /// The regressor fitted on each call
    pub fn regressor(&self) -> &R {
        &self.regressor
    }

    /// Observation floor
    pub fn min_observations(&self) -> usize {
        self.min_observations
    }

    /// Horizon used when none is given
    pub fn default_horizon(&self) -> usize {
        self.default_horizon
    }

    /// Forecast `horizon` days past the latest observation
    pub fn forecast(&self, observations: &[Observation], horizon: usize) -> Result<Forecast> {
        self.check_sufficient(observations.len())?;
        let series = HistoricalSeries::from_observations(observations);
        self.forecast_series(&series, horizon)
    }

    /// Forecast over the default horizon
    pub fn forecast_default(&self, observations: &[Observation]) -> Result<Forecast> {
        self.forecast(observations, self.default_horizon)
    }

    /// Forecast from raw storage records and wrap the outcome as a payload.
    ///
    /// A short series becomes the error payload before any record is parsed.
    /// Malformed records and invalid horizons are returned as errors.
    pub fn forecast_records(
        &self,
        records: &[PriceRecord],
        horizon: Option<usize>,
    ) -> Result<ForecastResponse> {
        let result = self
            .check_sufficient(records.len())
            .and_then(|_| HistoricalSeries::from_records(records))
            .and_then(|series| {
                self.forecast_series(&series, horizon.unwrap_or(self.default_horizon))
            });

        ForecastResponse::from_result(result)
    }

    /// Forecast from an already sorted series
    #[instrument(
        level = "debug",
        skip_all,
        fields(model = self.regressor.name(), observations = series.len(), horizon = horizon)
    )]
    pub fn forecast_series(&self, series: &HistoricalSeries, horizon: usize) -> Result<Forecast> {
        self.check_sufficient(series.len())?;
        check_horizon(horizon)?;

        let (offsets, targets) = training_data(series);
        let (Some(last), Some(&last_offset)) = (series.last(), offsets.last()) else {
            return Err(self.insufficient(series.len()));
        };

        let fitted = self.regressor.fit(&to_features(&offsets), &targets)?;
        debug!("fitted {} on {} observations", fitted.name(), series.len());

        let future_dates = future_dates(last.date(), horizon)?;
        let future_features: Vec<f64> = (1..=horizon as i64)
            .map(|step| (last_offset + step) as f64)
            .collect();

        let raw = fitted.predict(&future_features);
        let Some(&final_prediction) = raw.last() else {
            return Err(ForecastError::Model(MathError::CalculationError(
                "Model returned no predictions".to_string(),
            )));
        };

        let trend_direction = TrendDirection::from_prices(final_prediction, last.price());
        let predicted_prices: Vec<f64> = raw.iter().map(|&p| round_to_cents(p)).collect();
        debug!(
            last_price = last.price(),
            final_prediction,
            trend = %trend_direction,
            "forecast ready"
        );

        Forecast::new(future_dates, predicted_prices, trend_direction)
    }

    /// In-sample accuracy of the regressor on this history
    pub fn evaluate(&self, observations: &[Observation]) -> Result<FitMetrics> {
        self.check_sufficient(observations.len())?;
        let series = HistoricalSeries::from_observations(observations);

        let (offsets, targets) = training_data(&series);
        let features = to_features(&offsets);
        let fitted = self.regressor.fit(&features, &targets)?;

        evaluate_fit(&fitted, &features, &targets)
    }

    fn check_sufficient(&self, count: usize) -> Result<()> {
        if count < self.min_observations {
            debug!(
                count,
                required = self.min_observations,
                "not enough observations to forecast"
            );
            return Err(self.insufficient(count));
        }
        Ok(())
    }

    fn insufficient(&self, actual: usize) -> ForecastError {
        ForecastError::InsufficientData {
            required: self.min_observations,
            actual,
        }
    }
}

fn check_horizon(horizon: usize) -> Result<()> {
    if horizon == 0 {
        return Err(ForecastError::InvalidParameter(
            "Horizon must be positive".to_string(),
        ));
    }
    Ok(())
}

/// Day offsets from the earliest date and the matching prices
fn training_data(series: &HistoricalSeries) -> (Vec<i64>, Vec<f64>) {
    (series.day_offsets(), series.prices())
}

fn to_features(offsets: &[i64]) -> Vec<f64> {
    offsets.iter().map(|&offset| offset as f64).collect()
}

/// The `horizon` calendar days following `last`
fn future_dates(last: NaiveDate, horizon: usize) -> Result<Vec<NaiveDate>> {
    (1..=horizon as u64)
        .map(|step| {
            last.checked_add_days(Days::new(step)).ok_or_else(|| {
                ForecastError::InvalidParameter(format!(
                    "Horizon of {} days runs past the last supported date",
                    horizon
                ))
            })
        })
        .collect()
}

/// Round to two decimals, never below zero
pub fn round_to_cents(value: f64) -> f64 {
    ((value * 100.0).round() / 100.0).max(0.0)
}

/// Forecast with the default engine
pub fn forecast(observations: &[Observation], horizon: usize) -> Result<Forecast> {
    ForecastEngine::new().forecast(observations, horizon)
}

/// Build the chart payload for raw storage records with the default engine.
///
/// `horizon` falls back to 7 days.
pub fn generate_price_forecast(
    records: &[PriceRecord],
    horizon: Option<usize>,
) -> Result<ForecastResponse> {
    ForecastEngine::new().forecast_records(records, horizon)
}
