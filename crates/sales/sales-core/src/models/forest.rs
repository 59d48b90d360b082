//! Random forest regression
//!
//! Each tree routes a feature vector from its root to a leaf, sending it
//! left when `x[feature] <= threshold`. The forest prediction is the mean
//! of the leaf values.

use sales_spi::{FeatureRow, Regressor, Result, SalesError};
use serde::{Deserialize, Serialize};

/// Tree node
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// Internal split
    Split {
        /// Index into the forest's feature list
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
    /// Leaf carrying the prediction
    Leaf { value: f64 },
}

impl TreeNode {
    pub fn leaf(value: f64) -> Self {
        TreeNode::Leaf { value }
    }

    pub fn split(feature: usize, threshold: f64, left: TreeNode, right: TreeNode) -> Self {
        TreeNode::Split {
            feature,
            threshold,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    fn evaluate(&self, features: &[f64]) -> Option<f64> {
        let mut node = self;
        loop {
            match node {
                TreeNode::Leaf { value } => return Some(*value),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if *features.get(*feature)? <= *threshold {
                        &**left
                    } else {
                        &**right
                    };
                }
            }
        }
    }

    /// Check feature indices and values across the whole subtree.
    fn check(&self, n_features: usize) -> std::result::Result<(), String> {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                TreeNode::Leaf { value } if !value.is_finite() => {
                    return Err(format!("leaf value {value} is not finite"));
                }
                TreeNode::Leaf { .. } => {}
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= n_features {
                        return Err(format!(
                            "split on feature {feature} but the model has {n_features} features"
                        ));
                    }
                    if threshold.is_nan() {
                        return Err(format!("split on feature {feature} has a NaN threshold"));
                    }
                    stack.push(left);
                    stack.push(right);
                }
            }
        }
        Ok(())
    }
}

/// Pre-trained random forest regressor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    /// Feature names in training order
    features: Vec<String>,
    trees: Vec<TreeNode>,
}

impl RandomForest {
    pub fn new(features: Vec<String>, trees: Vec<TreeNode>) -> Result<Self> {
        let forest = Self { features, trees };
        forest.validate("random forest")?;
        Ok(forest)
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub(crate) fn validate(&self, source: &str) -> Result<()> {
        if self.trees.is_empty() {
            return Err(SalesError::unavailable(source, "random forest has no trees"));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.check(self.features.len())
                .map_err(|reason| SalesError::unavailable(source, format!("tree {i}: {reason}")))?;
        }
        Ok(())
    }
}

impl Regressor for RandomForest {
    fn kind(&self) -> &str {
        "random_forest"
    }

    fn feature_names(&self) -> &[String] {
        &self.features
    }

    fn predict(&self, row: &FeatureRow) -> Result<f64> {
        let values = row.aligned(&self.features)?;

        let mut sum = 0.0;
        for (i, tree) in self.trees.iter().enumerate() {
            sum += tree.evaluate(&values).ok_or_else(|| {
                SalesError::InferenceFailed(format!("tree {i} references a missing feature"))
            })?;
        }
        Ok(sum / self.trees.len() as f64)
    }
}
