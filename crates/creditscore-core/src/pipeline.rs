//! End-to-end inference: payload in, [`PredictionResult`] out.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::charts::{AuxiliaryCharts, FeatureImportanceChart, ModelMetric, ScoreIndicator};
use crate::classifier::ClassifierAdapter;
use crate::error::Result;
use crate::result::{compose, PredictionResult};
use crate::schema::FeatureSchema;
use crate::score::resolve;
use crate::validate::{validate, RawPayload};
use crate::vector::build;

/// Request handler core.
///
/// Holds the loaded classifier and the static chart data. Built once at
/// startup and shared read-only; [`CreditScorer::predict`] never mutates it.
#[derive(Debug, Clone)]
pub struct CreditScorer {
    adapter: ClassifierAdapter,
    importance_chart: FeatureImportanceChart,
    metrics: Vec<ModelMetric>,
}

impl CreditScorer {
    pub fn new(adapter: ClassifierAdapter, metrics: Vec<ModelMetric>) -> Self {
        let importance_chart = FeatureImportanceChart::from_importances(&adapter.feature_importances());
        Self {
            adapter,
            importance_chart,
            metrics,
        }
    }

    /// Uses [`ModelMetric::defaults`] for the metrics chart.
    pub fn with_default_metrics(adapter: ClassifierAdapter) -> Self {
        Self::new(adapter, ModelMetric::defaults())
    }

    pub fn schema(&self) -> &FeatureSchema {
        self.adapter.schema()
    }

    pub fn adapter(&self) -> &ClassifierAdapter {
        &self.adapter
    }

    pub fn metrics(&self) -> &[ModelMetric] {
        &self.metrics
    }

    /// Runs validation, vector assembly, classification and resolution.
    ///
    /// Validation errors abort before the classifier is consulted.
    pub fn predict(&self, payload: &RawPayload) -> Result<PredictionResult> {
        let start = Instant::now();
        let schema = self.adapter.schema();

        let attrs = validate(schema, payload).inspect_err(|e| {
            warn!(event = "rejected", field = e.field(), kind = e.kind());
        })?;
        let vector = build(schema, &attrs)?;
        debug!(event = "vector", values = ?vector.as_slice());

        let category = self.adapter.classify(&vector)?;
        let (score_range, advisory_message) = resolve(category);

        let charts = AuxiliaryCharts {
            feature_importance: self.importance_chart.clone(),
            model_metrics: self.metrics.clone(),
            score_indicator: ScoreIndicator::from(score_range),
        };

        info!(
            event = "prediction",
            category = u64::from(category.label()),
            lower = u64::from(score_range.lower),
            upper = u64::from(score_range.upper),
            severity = score_range.severity.as_str(),
            elapsed_us = start.elapsed().as_micros() as u64,
        );

        Ok(compose(category, score_range, advisory_message, charts))
    }
}
