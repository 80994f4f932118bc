//! Regression strategies mapping a day offset to a price
//!
//! The engine only needs something it can fit on `(day offset, price)` pairs
//! and then query at future offsets. [`PriceRegressor`] is that seam; the
//! concrete models are:
//!
//! - [`TrendForestRegressor`]: linear trend plus a random forest on the residuals (default)
//! - [`RandomForestRegressor`]: a plain random forest on the prices
//! - [`LinearTrendRegressor`]: an ordinary least-squares line

use crate::error::{ForecastError, Result};
use forecast_math::ForestParams;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display};
use std::str::FromStr;

pub mod linear_trend;
pub mod random_forest;
pub mod trend_forest;

pub use linear_trend::{FittedLinearTrend, LinearTrendRegressor};
pub use random_forest::{FittedRandomForest, RandomForestRegressor};
pub use trend_forest::{FittedTrendForest, TrendForestRegressor};

/// Fitted regressor
pub trait FittedRegressor: Debug + Send + Sync {
    /// Predict a price for each feature value
    fn predict(&self, features: &[f64]) -> Vec<f64>;

    /// Name of the model
    fn name(&self) -> &str;
}

/// Regressor that can be fitted on paired features and prices
pub trait PriceRegressor: Debug + Clone + Send + Sync {
    /// The type of fitted model produced
    type Fitted: FittedRegressor;

    /// Fit the model on feature values and their observed prices
    fn fit(&self, features: &[f64], targets: &[f64]) -> Result<Self::Fitted>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

/// Validate forest parameters, reporting failures as invalid parameters
pub(crate) fn check_forest_params(params: &ForestParams) -> Result<()> {
    params
        .validate()
        .map_err(|e| ForecastError::InvalidParameter(e.to_string()))
}

/// Selectable regression strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// Linear trend with a random forest over the residuals
    #[default]
    TrendForest,
    /// Plain random forest
    Forest,
    /// Least-squares line
    Linear,
}

impl Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModelKind::TrendForest => "trend_forest",
            ModelKind::Forest => "forest",
            ModelKind::Linear => "linear",
        };
        f.write_str(name)
    }
}

impl FromStr for ModelKind {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "trend_forest" | "trend" => Ok(ModelKind::TrendForest),
            "forest" | "random_forest" | "rf" => Ok(ModelKind::Forest),
            "linear" | "ols" => Ok(ModelKind::Linear),
            other => Err(ForecastError::InvalidParameter(format!(
                "Unknown model: {}",
                other
            ))),
        }
    }
}

/// A regressor chosen at runtime from a [`ModelKind`]
#[derive(Debug, Clone)]
pub enum AnyRegressor {
    TrendForest(TrendForestRegressor),
    Forest(RandomForestRegressor),
    Linear(LinearTrendRegressor),
}

/// Fitted counterpart of [`AnyRegressor`]
#[derive(Debug, Clone)]
pub enum AnyFitted {
    TrendForest(FittedTrendForest),
    Forest(FittedRandomForest),
    Linear(FittedLinearTrend),
}

impl AnyRegressor {
    /// Build the regressor for `kind`. Forest parameters are ignored by the linear model.
    pub fn new(kind: ModelKind, params: ForestParams) -> Result<Self> {
        Ok(match kind {
            ModelKind::TrendForest => AnyRegressor::TrendForest(TrendForestRegressor::new(params)?),
            ModelKind::Forest => AnyRegressor::Forest(RandomForestRegressor::new(params)?),
            ModelKind::Linear => AnyRegressor::Linear(LinearTrendRegressor::new()),
        })
    }

    /// The strategy this regressor implements
    pub fn kind(&self) -> ModelKind {
        match self {
            AnyRegressor::TrendForest(_) => ModelKind::TrendForest,
            AnyRegressor::Forest(_) => ModelKind::Forest,
            AnyRegressor::Linear(_) => ModelKind::Linear,
        }
    }
}

impl PriceRegressor for AnyRegressor {
    type Fitted = AnyFitted;

    fn fit(&self, features: &[f64], targets: &[f64]) -> Result<Self::Fitted> {
        Ok(match self {
            AnyRegressor::TrendForest(model) => AnyFitted::TrendForest(model.fit(features, targets)?),
            AnyRegressor::Forest(model) => AnyFitted::Forest(model.fit(features, targets)?),
            AnyRegressor::Linear(model) => AnyFitted::Linear(model.fit(features, targets)?),
        })
    }

    fn name(&self) -> &str {
        match self {
            AnyRegressor::TrendForest(model) => model.name(),
            AnyRegressor::Forest(model) => model.name(),
            AnyRegressor::Linear(model) => model.name(),
        }
    }
}

impl FittedRegressor for AnyFitted {
    fn predict(&self, features: &[f64]) -> Vec<f64> {
        match self {
            AnyFitted::TrendForest(model) => model.predict(features),
            AnyFitted::Forest(model) => model.predict(features),
            AnyFitted::Linear(model) => model.predict(features),
        }
    }

    fn name(&self) -> &str {
        match self {
            AnyFitted::TrendForest(model) => model.name(),
            AnyFitted::Forest(model) => model.name(),
            AnyFitted::Linear(model) => model.name(),
        }
    }
}
