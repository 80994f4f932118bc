//! Ordinary least-squares trend regressor

use crate::error::Result;
use crate::models::{FittedRegressor, PriceRegressor};
use forecast_math::LinearTrend;

/// Linear trend regression model
#[derive(Debug, Clone)]
pub struct LinearTrendRegressor {
    /// Name of the model
    name: String,
}

/// Fitted linear trend model
#[derive(Debug, Clone)]
pub struct FittedLinearTrend {
    /// Name of the model
    name: String,
    /// Fitted line
    trend: LinearTrend,
}

impl LinearTrendRegressor {
    /// Create a new linear trend model
    pub fn new() -> Self {
        Self {
            name: "Linear Trend".to_string(),
        }
    }
}

impl Default for LinearTrendRegressor {
    fn default() -> Self {
        Self::new()
    }
}

impl PriceRegressor for LinearTrendRegressor {
    type Fitted = FittedLinearTrend;

    fn fit(&self, features: &[f64], targets: &[f64]) -> Result<Self::Fitted> {
        Ok(FittedLinearTrend {
            name: self.name.clone(),
            trend: LinearTrend::fit(features, targets)?,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl FittedLinearTrend {
    /// The fitted line
    pub fn trend(&self) -> &LinearTrend {
        &self.trend
    }
}

impl FittedRegressor for FittedLinearTrend {
    fn predict(&self, features: &[f64]) -> Vec<f64> {
        features.iter().map(|&x| self.trend.predict(x)).collect()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
