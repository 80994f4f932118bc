//! Linear trend with a random forest over the residuals
//!
//! The line carries the drift of the series past the last observation, and
//! the forest models the seasonal bumps and spikes around that line.

use crate::error::Result;
use crate::models::{check_forest_params, FittedRegressor, PriceRegressor};
use forecast_math::{ForestParams, LinearTrend, RandomForest};

/// Trend-plus-residual-forest regression model
#[derive(Debug, Clone)]
pub struct TrendForestRegressor {
    /// Name of the model
    name: String,
    /// Hyper-parameters of the residual forest
    params: ForestParams,
}

/// Fitted trend-plus-residual-forest model
#[derive(Debug, Clone)]
pub struct FittedTrendForest {
    /// Name of the model
    name: String,
    /// Least-squares trend
    trend: LinearTrend,
    /// Forest over the detrended prices
    residuals: RandomForest,
}

impl TrendForestRegressor {
    /// Create a new trend forest model
    pub fn new(params: ForestParams) -> Result<Self> {
        check_forest_params(&params)?;

        Ok(Self {
            name: format!(
                "Trend Forest (trees={}, seed={})",
                params.n_estimators, params.seed
            ),
            params,
        })
    }

    /// Hyper-parameters of the residual forest
    pub fn params(&self) -> &ForestParams {
        &self.params
    }
}

impl Default for TrendForestRegressor {
    fn default() -> Self {
        let params = ForestParams::default();
        Self {
            name: format!(
                "Trend Forest (trees={}, seed={})",
                params.n_estimators, params.seed
            ),
            params,
        }
    }
}

impl PriceRegressor for TrendForestRegressor {
    type Fitted = FittedTrendForest;

    fn fit(&self, features: &[f64], targets: &[f64]) -> Result<Self::Fitted> {
        let trend = LinearTrend::fit(features, targets)?;
        let detrended = trend.residuals(features, targets);
        let residuals = RandomForest::fit(&self.params, features, &detrended)?;

        Ok(FittedTrendForest {
            name: self.name.clone(),
            trend,
            residuals,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl FittedTrendForest {
    /// The fitted linear trend
    pub fn trend(&self) -> &LinearTrend {
        &self.trend
    }
}

impl FittedRegressor for FittedTrendForest {
    fn predict(&self, features: &[f64]) -> Vec<f64> {
        features
            .iter()
            .map(|&x| self.trend.predict(x) + self.residuals.predict(x))
            .collect()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
