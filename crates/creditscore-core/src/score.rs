//! Categories, score ranges and advisory messages.
//!
//! The classifier predicts one of three creditworthiness categories. Each
//! category maps to exactly one closed credit score interval and one canned
//! recommendation; the tables below are the whole mapping.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CreditScoreError, Result};

/// Classifier output: low, medium or high creditworthiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Category {
    Low = 0,
    Medium = 1,
    High = 2,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Low, Category::Medium, Category::High];

    /// Numeric class label as emitted by the model.
    pub const fn label(self) -> u8 {
        self as u8
    }

    /// Converts a raw class label, rejecting anything outside {0, 1, 2}.
    ///
    /// ```
    /// use creditscore_core::Category;
    ///
    /// assert_eq!(Category::from_label(1).unwrap(), Category::Medium);
    /// assert!(Category::from_label(3).is_err());
    /// ```
    pub fn from_label(label: i64) -> Result<Self> {
        match label {
            0 => Ok(Category::Low),
            1 => Ok(Category::Medium),
            2 => Ok(Category::High),
            other => Err(CreditScoreError::InternalInvariant(format!(
                "class label {} is outside the category set {{0, 1, 2}}",
                other
            ))),
        }
    }
}

impl From<Category> for u8 {
    fn from(category: Category) -> u8 {
        category.label()
    }
}

impl TryFrom<u8> for Category {
    type Error = CreditScoreError;

    fn try_from(label: u8) -> Result<Self> {
        Category::from_label(i64::from(label))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Qualitative tag carried alongside a score range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Severe,
    Moderate,
    Good,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Severe => "severe",
            Severity::Moderate => "moderate",
            Severity::Good => "good",
        }
    }
}

/// A closed credit score interval `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreRange {
    pub lower: u16,
    pub upper: u16,
    pub severity: Severity,
}

impl ScoreRange {
    pub const fn new(lower: u16, upper: u16, severity: Severity) -> Self {
        Self {
            lower,
            upper,
            severity,
        }
    }

    pub fn contains(&self, score: u16) -> bool {
        (self.lower..=self.upper).contains(&score)
    }
}

impl fmt::Display for ScoreRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}] {}", self.lower, self.upper, self.severity.as_str())
    }
}

/// One of the three canned recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AdvisoryMessage(&'static str);

impl AdvisoryMessage {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for AdvisoryMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

pub const LOW_RANGE: ScoreRange = ScoreRange::new(300, 579, Severity::Severe);
pub const MEDIUM_RANGE: ScoreRange = ScoreRange::new(580, 669, Severity::Moderate);
pub const HIGH_RANGE: ScoreRange = ScoreRange::new(670, 739, Severity::Good);

const LOW_ADVICE: &str = "Le score de crédit du client est bas, ce qui indique un risque élevé. \
Il est recommandé de ne pas approuver sa demande.";
const MEDIUM_ADVICE: &str = "Le score de crédit du client est moyen, suggérant un risque modéré. \
Vous pouvez envisager d'approuver sa demande sous certaines conditions.";
const HIGH_ADVICE: &str = "Le score de crédit du client est élevé, ce qui témoigne de sa fiabilité. \
Vous pouvez approuver sa demande en toute confiance.";

/// Score interval for a category.
pub fn score_range(category: Category) -> ScoreRange {
    match category {
        Category::Low => LOW_RANGE,
        Category::Medium => MEDIUM_RANGE,
        Category::High => HIGH_RANGE,
    }
}

/// Recommendation text for a category.
pub fn advisory(category: Category) -> AdvisoryMessage {
    match category {
        Category::Low => AdvisoryMessage(LOW_ADVICE),
        Category::Medium => AdvisoryMessage(MEDIUM_ADVICE),
        Category::High => AdvisoryMessage(HIGH_ADVICE),
    }
}

/// Resolves both the range and the recommendation for a category.
///
/// # Examples
///
/// ```
/// use creditscore_core::{resolve, Category, Severity};
///
/// let (range, _message) = resolve(Category::Medium);
/// assert_eq!((range.lower, range.upper), (580, 669));
/// assert_eq!(range.severity, Severity::Moderate);
/// ```
pub fn resolve(category: Category) -> (ScoreRange, AdvisoryMessage) {
    (score_range(category), advisory(category))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_low() {
        let (range, message) = resolve(Category::Low);
        assert_eq!(range, ScoreRange::new(300, 579, Severity::Severe));
        assert!(message.as_str().contains("risque élevé"));
        assert!(message.as_str().contains("ne pas approuver"));
    }

    #[test]
    fn test_resolve_medium() {
        let (range, message) = resolve(Category::Medium);
        assert_eq!(range, ScoreRange::new(580, 669, Severity::Moderate));
        assert!(message.as_str().contains("risque modéré"));
    }

    #[test]
    fn test_resolve_high() {
        let (range, message) = resolve(Category::High);
        assert_eq!(range, ScoreRange::new(670, 739, Severity::Good));
        assert!(message.as_str().contains("fiabilité"));
    }

    #[test]
    fn test_ranges_are_disjoint_and_ordered() {
        let ranges: Vec<_> = Category::ALL.iter().map(|c| score_range(*c)).collect();
        for pair in ranges.windows(2) {
            assert_eq!(pair[0].upper + 1, pair[1].lower);
        }
        assert!(ranges[0].contains(300) && ranges[0].contains(579));
        assert!(!ranges[0].contains(580));
        assert!(ranges[2].contains(739) && !ranges[2].contains(740));
    }

    #[test]
    fn test_messages_are_distinct() {
        let messages: Vec<_> = Category::ALL.iter().map(|c| advisory(*c)).collect();
        assert_ne!(messages[0], messages[1]);
        assert_ne!(messages[1], messages[2]);
        assert_ne!(messages[0], messages[2]);
    }

    #[test]
    fn test_label_out_of_set() {
        for label in [-1, 3, 42] {
            let err = Category::from_label(label).unwrap_err();
            assert!(matches!(err, CreditScoreError::InternalInvariant(_)));
        }
    }

    #[test]
    fn test_label_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_label(category.label().into()).unwrap(), category);
        }
    }

    #[test]
    fn test_category_serializes_as_number() {
        assert_eq!(serde_json::to_string(&Category::High).unwrap(), "2");
        assert!(serde_json::from_str::<Category>("7").is_err());
    }
}
