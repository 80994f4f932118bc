//! Engine configuration

use crate::error::{ForecastError, Result};
use crate::models::ModelKind;
use forecast_math::ForestParams;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Days forecast when the caller does not ask for a horizon
pub const DEFAULT_HORIZON: usize = 7;

/// Fewest observations the engine will fit a model on
pub const MIN_OBSERVATIONS: usize = 5;

/// Forecast engine settings.
///
/// Every field has a default, so a config file only needs the keys it changes:
///
/// ```json
/// { "horizon": 14, "model": "forest", "forest": { "n_estimators": 200 } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Days to forecast when no horizon is given
    pub horizon: usize,
    /// Observation floor; may be raised above 5 but never lowered
    pub min_observations: usize,
    /// Regression strategy
    pub model: ModelKind,
    /// Forest hyper-parameters, shared by both forest strategies
    pub forest: ForestParams,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon: DEFAULT_HORIZON,
            min_observations: MIN_OBSERVATIONS,
            model: ModelKind::default(),
            forest: ForestParams::default(),
        }
    }
}

impl ForecastConfig {
    /// Load and validate a config from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Parse and validate a config from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.horizon == 0 {
            return Err(ForecastError::InvalidParameter(
                "Horizon must be positive".to_string(),
            ));
        }

        if self.min_observations < MIN_OBSERVATIONS {
            return Err(ForecastError::InvalidParameter(format!(
                "Minimum observations must be at least {}",
                MIN_OBSERVATIONS
            )));
        }

        self.forest
            .validate()
            .map_err(|e| ForecastError::InvalidParameter(e.to_string()))
    }
}
