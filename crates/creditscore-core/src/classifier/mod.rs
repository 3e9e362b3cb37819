//! Classifier integration.
//!
//! The model itself is a black box behind [`Classifier`]. [`ClassifierAdapter`]
//! is the read-only handle the pipeline holds: it turns raw class labels into
//! [`Category`] values and pairs importances with schema field names.

pub mod forest;


use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::error::{CreditScoreError, Result};
use crate::schema::{FeatureField, FeatureSchema};
use crate::score::Category;
use crate::vector::FeatureVector;

pub use forest::{DecisionTree, RandomForest};

/// A pre-trained, immutable model.
///
/// Implementations must be deterministic: the same features always give the
/// same label.
pub trait Classifier: Send + Sync {
    /// Predicts the raw class label for one sample in schema order.
    fn predict(&self, features: &[f64]) -> i64;

    /// Per-feature weights in schema order.
    fn feature_importances(&self) -> &[f64];

    /// Short description for logs and health checks.
    fn describe(&self) -> String {
        String::from("classifier")
    }
}

/// Importance of one input feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureImportance {
    pub field: &'static FeatureField,
    pub weight: f64,
}

/// Shared, read-only handle over a loaded classifier.
#[derive(Clone)]
pub struct ClassifierAdapter {
    model: Arc<dyn Classifier>,
    schema: FeatureSchema,
}

impl ClassifierAdapter {
    /// Wraps a loaded model, checking it reports one importance per feature.
    pub fn new(model: Arc<dyn Classifier>, schema: FeatureSchema) -> Result<Self> {
        let importances = model.feature_importances();
        if importances.len() != schema.len() {
            return Err(CreditScoreError::ModelLoad(format!(
                "model reports {} feature importances, schema has {} fields",
                importances.len(),
                schema.len()
            )));
        }
        Ok(Self { model, schema })
    }

    /// Classifies one feature vector.
    pub fn classify(&self, vector: &FeatureVector) -> Result<Category> {
        if vector.len() != self.schema.len() {
            return Err(CreditScoreError::InternalInvariant(format!(
                "feature vector has {} values, schema has {} fields",
                vector.len(),
                self.schema.len()
            )));
        }
        Category::from_label(self.model.predict(vector.as_slice()))
    }

    /// Feature importances paired with their schema fields, in schema order.
    pub fn feature_importances(&self) -> Vec<FeatureImportance> {
        self.schema
            .fields()
            .iter()
            .zip(self.model.feature_importances())
            .map(|(field, &weight)| FeatureImportance { field, weight })
            .collect()
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn describe(&self) -> String {
        self.model.describe()
    }
}

impl fmt::Debug for ClassifierAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassifierAdapter")
            .field("model", &self.model.describe())
            .finish()
    }
}
