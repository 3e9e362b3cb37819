//! The response object handed to the rendering side.

use serde::Serialize;

use crate::charts::AuxiliaryCharts;
use crate::score::{AdvisoryMessage, Category, ScoreRange};

/// Outcome of one inference request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub category: Category,
    pub score_range: ScoreRange,
    pub advisory_message: AdvisoryMessage,
    pub auxiliary_charts: AuxiliaryCharts,
}

/// Assembles a [`PredictionResult`]. No checks, no derivation.
pub fn compose(
    category: Category,
    score_range: ScoreRange,
    advisory_message: AdvisoryMessage,
    auxiliary_charts: AuxiliaryCharts,
) -> PredictionResult {
    PredictionResult {
        category,
        score_range,
        advisory_message,
        auxiliary_charts,
    }
}
