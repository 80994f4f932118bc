//! CART regression tree over a single numeric feature
//!
//! Splits are chosen to minimize the summed squared error of the two
//! children. Candidate thresholds sit halfway between consecutive distinct
//! feature values, and a sample goes left when `feature <= threshold`.
//! Leaves predict the mean target of the samples that reached them, so a
//! tree never predicts outside the range of its training targets.

use crate::stats::Moments;
use crate::{check_sample, MathError, Result};
use serde::{Deserialize, Serialize};

/// Growth limits for a regression tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeParams {
    /// Maximum depth of the tree, unlimited when `None`
    pub max_depth: Option<usize>,
    /// Minimum number of samples a node needs before it may be split
    pub min_samples_split: usize,
    /// Minimum number of samples each child of a split must keep
    pub min_samples_leaf: usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
        }
    }
}

impl TreeParams {
    /// Validate the growth limits
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == Some(0) {
            return Err(MathError::InvalidInput(
                "Max depth must be at least 1".to_string(),
            ));
        }

        if self.min_samples_split < 2 {
            return Err(MathError::InvalidInput(
                "Min samples split must be at least 2".to_string(),
            ));
        }

        if self.min_samples_leaf == 0 {
            return Err(MathError::InvalidInput(
                "Min samples leaf must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// A fitted regression tree
#[derive(Debug, Clone)]
pub struct RegressionTree {
    nodes: Vec<Node>,
}

impl RegressionTree {
    /// Fit a tree on paired feature and target values
    pub fn fit(params: &TreeParams, features: &[f64], targets: &[f64]) -> Result<Self> {
        check_sample(features, targets)?;
        params.validate()?;

        let mut samples: Vec<(f64, f64)> = features
            .iter()
            .copied()
            .zip(targets.iter().copied())
            .collect();
        samples.sort_by(|a, b| a.0.total_cmp(&b.0));

        Ok(Self::from_sorted(params, &samples))
    }

    /// Grow a tree from samples already sorted by feature. Callers validate the params.
    pub(crate) fn from_sorted(params: &TreeParams, samples: &[(f64, f64)]) -> Self {
        let mut nodes = Vec::new();
        grow(params, samples, 0, &mut nodes);
        Self { nodes }
    }

    /// Predict the target for a feature value
    pub fn predict(&self, feature: f64) -> f64 {
        let mut index = 0;
        loop {
            match self.nodes[index] {
                Node::Leaf { value } => return value,
                Node::Split {
                    threshold,
                    left,
                    right,
                } => {
                    index = if feature <= threshold { left } else { right };
                }
            }
        }
    }

    /// Number of leaves in the tree
    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, Node::Leaf { .. }))
            .count()
    }

    /// Length of the longest root-to-leaf path, zero for a single leaf
    pub fn depth(&self) -> usize {
        self.depth_from(0)
    }

    fn depth_from(&self, index: usize) -> usize {
        match self.nodes[index] {
            Node::Leaf { .. } => 0,
            Node::Split { left, right, .. } => {
                1 + self.depth_from(left).max(self.depth_from(right))
            }
        }
    }
}

/// Grow the subtree for `samples` and return the index of its root node
fn grow(
    params: &TreeParams,
    samples: &[(f64, f64)],
    depth: usize,
    nodes: &mut Vec<Node>,
) -> usize {
    let mut total = Moments::default();
    for &(_, target) in samples {
        total.push(target);
    }

    let index = nodes.len();
    nodes.push(Node::Leaf {
        value: total.mean(),
    });

    let depth_left = params.max_depth.map_or(true, |max| depth < max);
    let pure = samples.iter().all(|s| s.1 == samples[0].1);
    if samples.len() < params.min_samples_split || !depth_left || pure {
        return index;
    }

    let Some(split) = best_split(params, samples, &total) else {
        return index;
    };

    let threshold = (samples[split - 1].0 + samples[split].0) / 2.0;
    let left = grow(params, &samples[..split], depth + 1, nodes);
    let right = grow(params, &samples[split..], depth + 1, nodes);
    nodes[index] = Node::Split {
        threshold,
        left,
        right,
    };

    index
}

/// Position of the split minimizing child SSE. Ties keep the leftmost candidate.
fn best_split(params: &TreeParams, samples: &[(f64, f64)], total: &Moments) -> Option<usize> {
    let n = samples.len();
    let mut left = Moments::default();
    let mut best: Option<(usize, f64)> = None;

    for i in 1..n {
        left.push(samples[i - 1].1);

        // No threshold separates equal feature values
        if samples[i - 1].0 == samples[i].0 {
            continue;
        }
        if i < params.min_samples_leaf || n - i < params.min_samples_leaf {
            continue;
        }

        let right = total.minus(&left);
        let score = left.sse() + right.sse();
        if best.map_or(true, |(_, best_score)| score < best_score) {
            best = Some((i, score));
        }
    }

    best.map(|(position, _)| position)
}
