//! CreditScore Core - the inference pipeline behind the credit score service
//!
//! This crate provides:
//! - The feature schema the classifier was trained on
//! - Payload validation and feature vector assembly
//! - The classifier seam and a random forest implementation
//! - Category to score range and recommendation mapping
//! - Auxiliary chart data and result composition

pub mod charts;
pub mod classifier;
pub mod error;
pub mod pipeline;
pub mod result;
pub mod schema;
pub mod score;
pub mod validate;
pub mod vector;

#[cfg(test)]
mod validate_tests;

pub use charts::{AuxiliaryCharts, FeatureImportanceChart, ImportanceRow, ModelMetric, ScoreIndicator};
pub use classifier::{Classifier, ClassifierAdapter, DecisionTree, FeatureImportance, RandomForest};
pub use error::{CreditScoreError, Result, ValidationError};
pub use pipeline::CreditScorer;
pub use result::{compose, PredictionResult};
pub use schema::{FeatureField, FeatureSchema, FeatureType, FEATURE_COUNT};
pub use score::{advisory, resolve, score_range, AdvisoryMessage, Category, ScoreRange, Severity};
pub use validate::{validate, RawPayload, ValidatedAttributes};
pub use vector::{build, FeatureVector};
