//! Random forest regression
//!
//! Each tree is grown on a bootstrap resample of the training data and the
//! forest predicts the mean of its trees. Every tree draws from its own
//! `StdRng`, seeded from a master generator seeded with `ForestParams::seed`,
//! so fitting the same sample twice yields identical forests.

use crate::tree::{RegressionTree, TreeParams};
use crate::{check_sample, MathError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Default number of trees in a forest
pub const DEFAULT_ESTIMATORS: usize = 100;

/// Default master seed for bootstrap sampling
pub const DEFAULT_SEED: u64 = 42;

/// Hyper-parameters of a random forest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestParams {
    /// Number of trees
    pub n_estimators: usize,
    /// Maximum depth of each tree, unlimited when `None`
    pub max_depth: Option<usize>,
    /// Minimum number of samples a node needs before it may be split
    pub min_samples_split: usize,
    /// Minimum number of samples each child of a split must keep
    pub min_samples_leaf: usize,
    /// Whether each tree trains on a bootstrap resample
    pub bootstrap: bool,
    /// Master seed for the bootstrap generators
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        let tree = TreeParams::default();
        Self {
            n_estimators: DEFAULT_ESTIMATORS,
            max_depth: tree.max_depth,
            min_samples_split: tree.min_samples_split,
            min_samples_leaf: tree.min_samples_leaf,
            bootstrap: true,
            seed: DEFAULT_SEED,
        }
    }
}

impl ForestParams {
    /// Growth limits applied to every tree in the forest
    pub fn tree_params(&self) -> TreeParams {
        TreeParams {
            max_depth: self.max_depth,
            min_samples_split: self.min_samples_split,
            min_samples_leaf: self.min_samples_leaf,
        }
    }

    /// Validate the forest parameters
    pub fn validate(&self) -> Result<()> {
        if self.n_estimators == 0 {
            return Err(MathError::InvalidInput(
                "Number of estimators must be positive".to_string(),
            ));
        }

        self.tree_params().validate()
    }
}

/// A fitted random forest
#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<RegressionTree>,
}

impl RandomForest {
    /// Fit a forest on paired feature and target values
    pub fn fit(params: &ForestParams, features: &[f64], targets: &[f64]) -> Result<Self> {
        check_sample(features, targets)?;
        params.validate()?;

        let tree_params = params.tree_params();
        let n = features.len();
        let mut seeds = StdRng::seed_from_u64(params.seed);

        let trees = (0..params.n_estimators)
            .map(|_| {
                let mut rng = StdRng::seed_from_u64(seeds.gen());
                let mut samples: Vec<(f64, f64)> = if params.bootstrap {
                    (0..n)
                        .map(|_| {
                            let i = rng.gen_range(0..n);
                            (features[i], targets[i])
                        })
                        .collect()
                } else {
                    features
                        .iter()
                        .copied()
                        .zip(targets.iter().copied())
                        .collect()
                };
                samples.sort_by(|a, b| a.0.total_cmp(&b.0));

                RegressionTree::from_sorted(&tree_params, &samples)
            })
            .collect();

        Ok(Self { trees })
    }

    /// Predict the target for a feature value
    pub fn predict(&self, feature: f64) -> f64 {
        let total: f64 = self.trees.iter().map(|tree| tree.predict(feature)).sum();
        total / self.trees.len() as f64
    }

    /// Predict the target for each feature value
    pub fn predict_many(&self, features: &[f64]) -> Vec<f64> {
        features.iter().map(|&x| self.predict(x)).collect()
    }

    /// Number of trees in the forest
    pub fn n_estimators(&self) -> usize {
        self.trees.len()
    }

    /// The fitted trees
    pub fn trees(&self) -> &[RegressionTree] {
        &self.trees
    }
}
