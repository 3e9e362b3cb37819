//! CreditScore - credit risk inference service
//!
//! Validates an applicant's ten credit attributes, classifies them with a
//! pre-trained random forest and returns a score range, a recommendation and
//! the data behind the dashboard charts.
//!
//! # Example
//!
//! ```rust
//! use creditscore::prelude::*;
//!
//! let (range, message) = resolve(Category::Low);
//! assert_eq!((range.lower, range.upper), (300, 579));
//! assert!(message.as_str().contains("risque élevé"));
//! ```

pub mod api;
pub mod server;

// Pipeline
pub use creditscore_core::{
    build, compose, resolve, validate, CreditScoreError, CreditScorer, FeatureSchema,
    FeatureVector, PredictionResult, RawPayload, ValidatedAttributes, ValidationError,
};

// Classifier seam
pub use creditscore_core::{Classifier, ClassifierAdapter, RandomForest};

// Configuration and console
pub use creditscore_config::{ConfigError, ServiceConfig};
pub use creditscore_console as console;

pub use server::{build_scorer, run, ServiceError};

pub mod prelude {
    pub use creditscore_core::{
        resolve, validate, AdvisoryMessage, Category, Classifier, ClassifierAdapter,
        CreditScorer, FeatureSchema, PredictionResult, ScoreRange, Severity,
    };
}
