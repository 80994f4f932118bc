//! Metrics for judging how closely a fitted model follows the history

use crate::error::{ForecastError, Result};
use crate::models::FittedRegressor;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// In-sample accuracy of a fitted model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitMetrics {
    /// Mean Absolute Error
    pub mae: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Percentage Error
    pub mape: f64,
}

/// Compare predictions against actual prices
pub fn fit_accuracy(predicted: &[f64], actual: &[f64]) -> Result<FitMetrics> {
    if predicted.len() != actual.len() || predicted.is_empty() {
        return Err(ForecastError::InvalidParameter(
            "Predicted and actual values must have the same non-zero length".to_string(),
        ));
    }

    let errors: Vec<f64> = predicted
        .iter()
        .zip(actual.iter())
        .map(|(&p, &a)| a - p)
        .collect();

    let mae = errors.iter().map(|e| e.abs()).mean();
    let mse = errors.iter().map(|e| e.powi(2)).mean();

    // Prices are positive, so every term is defined
    let mape = actual
        .iter()
        .zip(errors.iter())
        .map(|(&a, &e)| e.abs() / a.abs() * 100.0)
        .mean();

    Ok(FitMetrics {
        mae,
        rmse: mse.sqrt(),
        mape,
    })
}

/// Evaluate a fitted model on the points it was trained on
pub fn evaluate_fit<F: FittedRegressor>(
    fitted: &F,
    features: &[f64],
    targets: &[f64],
) -> Result<FitMetrics> {
    let predicted = fitted.predict(features);
    fit_accuracy(&predicted, targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_perfect_fit() {
        let metrics = fit_accuracy(&[100.0, 200.0], &[100.0, 200.0]).unwrap();

        assert_relative_eq!(metrics.mae, 0.0);
        assert_relative_eq!(metrics.rmse, 0.0);
        assert_relative_eq!(metrics.mape, 0.0);
    }

    #[test]
    fn test_known_errors() {
        let metrics = fit_accuracy(&[90.0, 210.0], &[100.0, 200.0]).unwrap();

        assert_relative_eq!(metrics.mae, 10.0);
        assert_relative_eq!(metrics.rmse, 10.0);
        assert_relative_eq!(metrics.mape, 7.5);
    }

    #[test]
    fn test_length_mismatch() {
        assert!(fit_accuracy(&[1.0], &[1.0, 2.0]).is_err());
        assert!(fit_accuracy(&[], &[]).is_err());
    }
}
