//! Random forest regressor over day offsets
//!
//! Trees cannot extrapolate: beyond the last training offset every tree
//! answers with its right-most leaf, so forecasts flatten out at a recent
//! price level.

use crate::error::Result;
use crate::models::{check_forest_params, FittedRegressor, PriceRegressor};
use forecast_math::{ForestParams, RandomForest};

/// Random forest regression model
#[derive(Debug, Clone)]
pub struct RandomForestRegressor {
    /// Name of the model
    name: String,
    /// Forest hyper-parameters
    params: ForestParams,
}

/// Fitted random forest model
#[derive(Debug, Clone)]
pub struct FittedRandomForest {
    /// Name of the model
    name: String,
    /// Fitted forest
    forest: RandomForest,
}

impl RandomForestRegressor {
    /// Create a new random forest model
    pub fn new(params: ForestParams) -> Result<Self> {
        check_forest_params(&params)?;

        Ok(Self {
            name: format!(
                "Random Forest (trees={}, seed={})",
                params.n_estimators, params.seed
            ),
            params,
        })
    }

    /// Forest hyper-parameters
    pub fn params(&self) -> &ForestParams {
        &self.params
    }
}

impl Default for RandomForestRegressor {
    fn default() -> Self {
        let params = ForestParams::default();
        Self {
            name: format!(
                "Random Forest (trees={}, seed={})",
                params.n_estimators, params.seed
            ),
            params,
        }
    }
}

impl PriceRegressor for RandomForestRegressor {
    type Fitted = FittedRandomForest;

    fn fit(&self, features: &[f64], targets: &[f64]) -> Result<Self::Fitted> {
        let forest = RandomForest::fit(&self.params, features, targets)?;

        Ok(FittedRandomForest {
            name: self.name.clone(),
            forest,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl FittedRegressor for FittedRandomForest {
    fn predict(&self, features: &[f64]) -> Vec<f64> {
        self.forest.predict_many(features)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
