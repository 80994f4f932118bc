//! Least-squares linear trend over a numeric feature

use crate::stats::mean;
use crate::{check_sample, Result};

/// A fitted line `target = slope * feature + intercept`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTrend {
    slope: f64,
    intercept: f64,
}

impl LinearTrend {
    /// Fit the ordinary least-squares line through the sample.
    ///
    /// When every feature value is the same the slope is undefined; the
    /// trend is then flat at the mean target.
    pub fn fit(features: &[f64], targets: &[f64]) -> Result<Self> {
        check_sample(features, targets)?;

        let x_mean = mean(features)?;
        let y_mean = mean(targets)?;

        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for (&x, &y) in features.iter().zip(targets.iter()) {
            numerator += (x - x_mean) * (y - y_mean);
            denominator += (x - x_mean) * (x - x_mean);
        }

        let slope = if denominator.abs() < 1e-10 {
            0.0
        } else {
            numerator / denominator
        };

        Ok(Self {
            slope,
            intercept: y_mean - slope * x_mean,
        })
    }

    /// Value of the line at a feature value
    pub fn predict(&self, feature: f64) -> f64 {
        self.slope * feature + self.intercept
    }

    /// Slope of the line (trend direction and strength)
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Intercept of the line
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Targets minus the fitted line at each feature
    pub fn residuals(&self, features: &[f64], targets: &[f64]) -> Vec<f64> {
        features
            .iter()
            .zip(targets.iter())
            .map(|(&x, &y)| y - self.predict(x))
            .collect()
    }
}
