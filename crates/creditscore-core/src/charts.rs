//! Data behind the three auxiliary charts.
//!
//! Only the numbers and labels live here. How a front end draws them
//! (colors, axes, hover text layout) is its own business.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::classifier::FeatureImportance;
use crate::score::{ScoreRange, Severity};

/// Upper bound of the score gauge axis.
pub const SCORE_AXIS_MAX: u16 = 739;

/// Reference value the score indicators report their delta against.
pub const SCORE_DELTA_REFERENCE: u16 = 300;

/// One bar of the feature importance chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportanceRow {
    pub field: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    /// Rounded to three decimals.
    pub importance: f64,
}

/// Feature importance bars, least important first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FeatureImportanceChart {
    pub rows: Vec<ImportanceRow>,
}

impl FeatureImportanceChart {
    pub fn from_importances(importances: &[FeatureImportance]) -> Self {
        let mut sorted: Vec<&FeatureImportance> = importances.iter().collect();
        sorted.sort_by(|a, b| a.weight.partial_cmp(&b.weight).unwrap_or(Ordering::Equal));

        let rows = sorted
            .into_iter()
            .map(|imp| ImportanceRow {
                field: imp.field.name,
                label: imp.field.label,
                description: imp.field.description,
                importance: round3(imp.weight),
            })
            .collect();
        Self { rows }
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// A model performance figure, in percent.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ModelMetric {
    pub name: String,
    pub value: f64,
    pub description: String,
}

impl ModelMetric {
    pub fn new(name: impl Into<String>, value: f64, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            description: description.into(),
        }
    }

    /// Precision, recall and accuracy measured on the held-out set.
    pub fn defaults() -> Vec<ModelMetric> {
        vec![
            ModelMetric::new(
                "Précision",
                92.0,
                "Nombre de vrais positifs divisé par le nombre total de prédictions positives",
            ),
            ModelMetric::new(
                "Rappel",
                92.0,
                "Nombre de vrais positifs divisé par le nombre total d'instances pertinentes",
            ),
            ModelMetric::new("Exactitude", 92.0, "Taux de prédictions correctes"),
        ]
    }
}

/// Gauge data for the resolved score interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreIndicator {
    pub lower: u16,
    pub upper: u16,
    pub severity: Severity,
    pub axis_max: u16,
    pub delta_reference: u16,
}

impl From<ScoreRange> for ScoreIndicator {
    fn from(range: ScoreRange) -> Self {
        Self {
            lower: range.lower,
            upper: range.upper,
            severity: range.severity,
            axis_max: SCORE_AXIS_MAX,
            delta_reference: SCORE_DELTA_REFERENCE,
        }
    }
}

/// Everything the rendering side needs besides the verdict itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuxiliaryCharts {
    pub feature_importance: FeatureImportanceChart,
    pub model_metrics: Vec<ModelMetric>,
    pub score_indicator: ScoreIndicator,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FeatureSchema;
    use crate::score::HIGH_RANGE;

    fn importances(weights: [f64; 10]) -> Vec<FeatureImportance> {
        FeatureSchema::standard()
            .fields()
            .iter()
            .zip(weights)
            .map(|(field, weight)| FeatureImportance { field, weight })
            .collect()
    }

    #[test]
    fn test_rows_sorted_ascending_and_rounded() {
        let chart = FeatureImportanceChart::from_importances(&importances([
            0.21234, 0.01, 0.15, 0.05, 0.08, 0.07, 0.19, 0.11, 0.06, 0.05766,
        ]));

        let weights: Vec<f64> = chart.rows.iter().map(|r| r.importance).collect();
        assert_eq!(
            weights,
            vec![0.01, 0.05, 0.058, 0.06, 0.07, 0.08, 0.11, 0.15, 0.19, 0.212]
        );
        assert_eq!(chart.rows[0].field, "num_credit_card");
        assert_eq!(chart.rows[0].label, "Num_Credit_Card");
        assert_eq!(chart.rows[9].field, "monthly_inhand_salary");
    }

    #[test]
    fn test_equal_weights_keep_schema_order() {
        let chart = FeatureImportanceChart::from_importances(&importances([0.1; 10]));
        let fields: Vec<_> = chart.rows.iter().map(|r| r.field).collect();
        let expected: Vec<_> = FeatureSchema::standard().names().collect();
        assert_eq!(fields, expected);
    }

    #[test]
    fn test_default_metrics() {
        let metrics = ModelMetric::defaults();
        let names: Vec<_> = metrics.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Précision", "Rappel", "Exactitude"]);
        assert!(metrics.iter().all(|m| m.value == 92.0));
    }

    #[test]
    fn test_indicator_from_range() {
        let indicator = ScoreIndicator::from(HIGH_RANGE);
        assert_eq!((indicator.lower, indicator.upper), (670, 739));
        assert_eq!(indicator.severity, Severity::Good);
        assert_eq!(indicator.axis_max, 739);
        assert_eq!(indicator.delta_reference, 300);
    }
}
