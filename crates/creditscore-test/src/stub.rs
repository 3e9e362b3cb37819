//! Stand-in classifiers.

use std::sync::atomic::{AtomicUsize, Ordering};

use creditscore_core::{Classifier, FEATURE_COUNT};

/// Always predicts the same label, counting calls.
#[derive(Debug)]
pub struct FixedClassifier {
    label: i64,
    importances: Vec<f64>,
    calls: AtomicUsize,
}

impl FixedClassifier {
    pub fn new(label: i64) -> Self {
        Self {
            label,
            importances: vec![1.0 / FEATURE_COUNT as f64; FEATURE_COUNT],
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_importances(mut self, importances: Vec<f64>) -> Self {
        self.importances = importances;
        self
    }

    /// Number of times `predict` ran.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Classifier for FixedClassifier {
    fn predict(&self, _features: &[f64]) -> i64 {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.label
    }

    fn feature_importances(&self) -> &[f64] {
        &self.importances
    }

    fn describe(&self) -> String {
        format!("fixed classifier (label {})", self.label)
    }
}

/// Predicts from a closure over the feature slice.
pub struct RuleClassifier<F> {
    rule: F,
    importances: Vec<f64>,
}

impl<F> RuleClassifier<F>
where
    F: Fn(&[f64]) -> i64 + Send + Sync,
{
    pub fn new(rule: F) -> Self {
        Self {
            rule,
            importances: vec![1.0 / FEATURE_COUNT as f64; FEATURE_COUNT],
        }
    }
}

impl<F> Classifier for RuleClassifier<F>
where
    F: Fn(&[f64]) -> i64 + Send + Sync,
{
    fn predict(&self, features: &[f64]) -> i64 {
        (self.rule)(features)
    }

    fn feature_importances(&self) -> &[f64] {
        &self.importances
    }
}
