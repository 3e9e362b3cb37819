//! A small forest export.
//!
//! Tree 1 splits on `outstanding_debt`, tree 2 on `interest_rate` then
//! `num_of_delayed_payment`. The reference applicant lands in category 2.
//!
//! # Example
//!
//! ```
//! use creditscore_core::Classifier;
//! use creditscore_test::forest::sample_forest;
//!
//! let forest = sample_forest();
//! assert_eq!(forest.trees().len(), 2);
//! assert_eq!(forest.feature_importances().len(), 10);
//! ```

use creditscore_core::{FeatureSchema, RandomForest};
use serde_json::{json, Value};

/// The forest as JSON, ready to write to a model file.
pub fn sample_forest_json() -> Value {
    let names: Vec<&str> = FeatureSchema::standard().labels().collect();
    json!({
        "feature_names": names,
        "classes": [0, 1, 2],
        "feature_importances": [0.071, 0.043, 0.212, 0.09, 0.118, 0.061, 0.187, 0.102, 0.066, 0.05],
        "trees": [
            {
                "children_left": [1, -1, -1],
                "children_right": [2, -1, -1],
                "feature": [6, -2, -2],
                "threshold": [1500.0, -2.0, -2.0],
                "value": [[30.0, 40.0, 30.0], [2.0, 8.0, 30.0], [28.0, 32.0, 0.0]]
            },
            {
                "children_left": [1, 3, -1, -1, -1],
                "children_right": [2, 4, -1, -1, -1],
                "feature": [2, 4, -2, -2, -2],
                "threshold": [18.5, 3.5, -2.0, -2.0, -2.0],
                "value": [[30.0, 40.0, 30.0], [10.0, 30.0, 30.0], [20.0, 10.0, 0.0], [0.0, 10.0, 30.0], [10.0, 20.0, 0.0]]
            }
        ]
    })
}

/// The forest, parsed.
pub fn sample_forest() -> RandomForest {
    RandomForest::from_json_str(&sample_forest_json().to_string())
        .unwrap_or_else(|e| panic!("sample forest must load: {}", e))
}
