//! Random forest classifier loaded from a JSON export.
//!
//! Trees use the flat node-array layout scikit-learn exposes on
//! `tree_`: parallel `children_left`, `children_right`, `feature`,
//! `threshold` and `value` arrays, with `-1` as the leaf marker. A forest
//! predicts the class with the highest mean leaf probability across trees.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::Classifier;
use crate::error::{CreditScoreError, Result};
use crate::schema::FeatureSchema;

const LEAF: i64 = -1;

/// One fitted decision tree.
///
/// Only reachable through a checked [`RandomForest`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DecisionTree {
    children_left: Vec<i64>,
    children_right: Vec<i64>,
    feature: Vec<i64>,
    threshold: Vec<f64>,
    /// Per-node class weights, one row per node, one column per class.
    value: Vec<Vec<f64>>,
}

impl DecisionTree {
    pub fn node_count(&self) -> usize {
        self.children_left.len()
    }

    /// Walks the tree and returns the class weights of the reached leaf.
    ///
    /// Assumes the tree passed [`RandomForest::check`].
    pub(crate) fn leaf_values(&self, features: &[f64]) -> &[f64] {
        let mut node = 0usize;
        while self.children_left[node] != LEAF {
            let index = self.feature[node] as usize;
            // Fitted thresholds are midpoints between f32 samples.
            let x = features[index] as f32 as f64;
            node = if x <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        &self.value[node]
    }

    fn check(&self, tree_index: usize, feature_count: usize, class_count: usize) -> Result<()> {
        let nodes = self.node_count();
        let invalid = |reason: String| {
            CreditScoreError::ModelLoad(format!("tree {}: {}", tree_index, reason))
        };

        if nodes == 0 {
            return Err(invalid("tree has no nodes".to_string()));
        }
        if self.children_right.len() != nodes
            || self.feature.len() != nodes
            || self.threshold.len() != nodes
            || self.value.len() != nodes
        {
            return Err(invalid("node arrays differ in length".to_string()));
        }

        for node in 0..nodes {
            let (left, right) = (self.children_left[node], self.children_right[node]);
            if left == LEAF || right == LEAF {
                if left != right {
                    return Err(invalid(format!("node {} has a single child", node)));
                }
                let row = &self.value[node];
                if row.len() != class_count {
                    return Err(invalid(format!(
                        "leaf {} has {} class weights, expected {}",
                        node,
                        row.len(),
                        class_count
                    )));
                }
                if row.iter().any(|w| !w.is_finite() || *w < 0.0) || row.iter().sum::<f64>() <= 0.0
                {
                    return Err(invalid(format!("leaf {} has unusable class weights", node)));
                }
                continue;
            }

            // Children always follow their parent, which also rules out cycles.
            for child in [left, right] {
                if child <= node as i64 || child >= nodes as i64 {
                    return Err(invalid(format!("node {} has child {} out of range", node, child)));
                }
            }
            let feature = self.feature[node];
            if feature < 0 || feature >= feature_count as i64 {
                return Err(invalid(format!("node {} splits on feature {}", node, feature)));
            }
            if self.threshold[node].is_nan() {
                return Err(invalid(format!("node {} has a NaN threshold", node)));
            }
        }
        Ok(())
    }
}

/// A fitted random forest classifier.
///
/// # Examples
///
/// ```
/// use creditscore_core::{Classifier, RandomForest};
///
/// let json = r#"{
///     "feature_names": ["Monthly_Inhand_Salary", "Num_Credit_Card", "Interest_Rate",
///         "Delay_from_due_date", "Num_of_Delayed_Payment", "Num_Credit_Inquiries",
///         "Outstanding_Debt", "Credit_History_Age", "Monthly_Balance", "Credit_Mix_Encoded"],
///     "classes": [0, 1, 2],
///     "feature_importances": [0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1],
///     "trees": [{
///         "children_left": [1, -1, -1],
///         "children_right": [2, -1, -1],
///         "feature": [6, -2, -2],
///         "threshold": [1000.0, -2.0, -2.0],
///         "value": [[5.0, 5.0, 5.0], [0.0, 1.0, 4.0], [4.0, 1.0, 0.0]]
///     }]
/// }"#;
///
/// let forest = RandomForest::from_json_str(json).unwrap();
/// let mut features = [0.0; 10];
/// features[6] = 500.0;
/// assert_eq!(forest.predict(&features), 2);
/// features[6] = 5000.0;
/// assert_eq!(forest.predict(&features), 0);
/// ```
///
/// Deserializing through serde runs the same checks as
/// [`RandomForest::from_json_str`], so an instance is always usable.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "RawForest")]
pub struct RandomForest {
    feature_names: Vec<String>,
    classes: Vec<i64>,
    feature_importances: Vec<f64>,
    trees: Vec<DecisionTree>,
}

/// Forest as read from disk, before any check.
#[derive(Deserialize)]
struct RawForest {
    feature_names: Vec<String>,
    classes: Vec<i64>,
    feature_importances: Vec<f64>,
    trees: Vec<DecisionTree>,
}

impl TryFrom<RawForest> for RandomForest {
    type Error = CreditScoreError;

    fn try_from(raw: RawForest) -> Result<Self> {
        let forest = RandomForest {
            feature_names: raw.feature_names,
            classes: raw.classes,
            feature_importances: raw.feature_importances,
            trees: raw.trees,
        };
        forest.check(&FeatureSchema::standard())?;
        Ok(forest)
    }
}

impl RandomForest {
    /// Loads and checks a forest from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CreditScoreError::ModelLoad(format!("cannot read {}: {}", path.display(), e))
        })?;
        let forest = Self::from_json_str(&contents)?;
        info!(
            event = "model_loaded",
            path = %path.display(),
            trees = forest.trees.len() as u64,
            classes = forest.classes.len() as u64,
        );
        Ok(forest)
    }

    /// Parses and checks a forest from JSON text.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let raw: RawForest = serde_json::from_str(s)
            .map_err(|e| CreditScoreError::ModelLoad(format!("invalid model JSON: {}", e)))?;
        Self::try_from(raw)
    }

    /// Training column names in model order.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Class labels in probability column order.
    pub fn classes(&self) -> &[i64] {
        &self.classes
    }

    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }

    /// Verifies the forest was trained for `schema` and is structurally sound.
    pub fn check(&self, schema: &FeatureSchema) -> Result<()> {
        if !self.feature_names.iter().map(String::as_str).eq(schema.labels()) {
            return Err(CreditScoreError::ModelLoad(format!(
                "model features {:?} do not match the schema order",
                self.feature_names
            )));
        }
        if self.feature_importances.len() != schema.len()
            || self.feature_importances.iter().any(|w| !w.is_finite())
        {
            return Err(CreditScoreError::ModelLoad(
                "feature importances must be one finite weight per feature".to_string(),
            ));
        }
        if self.classes.is_empty() {
            return Err(CreditScoreError::ModelLoad("model has no classes".to_string()));
        }
        let mut sorted = self.classes.clone();
        sorted.sort_unstable();
        sorted.dedup();
        if sorted.len() != self.classes.len() {
            return Err(CreditScoreError::ModelLoad("duplicate class labels".to_string()));
        }
        if self.trees.is_empty() {
            return Err(CreditScoreError::ModelLoad("model has no trees".to_string()));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.check(i, schema.len(), self.classes.len())?;
        }
        Ok(())
    }

    /// Mean class probabilities across all trees.
    pub fn predict_proba(&self, features: &[f64]) -> Vec<f64> {
        let mut proba = vec![0.0; self.classes.len()];
        for tree in &self.trees {
            let leaf = tree.leaf_values(features);
            let total: f64 = leaf.iter().sum();
            for (p, w) in proba.iter_mut().zip(leaf) {
                *p += w / total;
            }
        }
        let n = self.trees.len() as f64;
        proba.iter_mut().for_each(|p| *p /= n);
        proba
    }
}

impl Classifier for RandomForest {
    fn predict(&self, features: &[f64]) -> i64 {
        let proba = self.predict_proba(features);
        // First maximum wins on ties.
        let mut best = 0;
        for (i, p) in proba.iter().enumerate().skip(1) {
            if *p > proba[best] {
                best = i;
            }
        }
        self.classes[best]
    }

    fn feature_importances(&self) -> &[f64] {
        &self.feature_importances
    }

    fn describe(&self) -> String {
        format!(
            "random forest ({} trees, classes {:?})",
            self.trees.len(),
            self.classes
        )
    }
}
