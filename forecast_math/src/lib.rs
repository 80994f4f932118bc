//! # Forecast Math
//!
//! Numeric building blocks for commodity price forecasting.
//! This crate provides the regression models the forecast engine fits over a
//! single numeric time feature:
//!
//! - CART regression trees
//! - Random forests of bagged regression trees with a fixed seed
//! - Least-squares linear trends

use thiserror::Error;

pub mod forest;
pub mod linear;
pub mod stats;
pub mod tree;

pub use forest::{ForestParams, RandomForest};
pub use linear::LinearTrend;
pub use tree::{RegressionTree, TreeParams};

/// Errors that can occur while fitting or evaluating regression models
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for forecasting math operations
pub type Result<T> = std::result::Result<T, MathError>;

/// Check that a feature and target slice describe the same non-empty, finite sample
pub(crate) fn check_sample(features: &[f64], targets: &[f64]) -> Result<()> {
    if features.len() != targets.len() {
        return Err(MathError::InvalidInput(format!(
            "Feature length ({}) doesn't match target length ({})",
            features.len(),
            targets.len()
        )));
    }

    if features.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot fit a model on an empty sample".to_string(),
        ));
    }

    if features
        .iter()
        .chain(targets.iter())
        .any(|value| !value.is_finite())
    {
        return Err(MathError::InvalidInput(
            "Sample contains NaN or infinite values".to_string(),
        ));
    }

    Ok(())
}
