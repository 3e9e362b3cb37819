//! Shared test fixtures for CreditScore crates.
//!
//! This crate provides stub classifiers, sample payloads and a small model file.
//! `creditscore-core` cannot use it for its own unit tests without pulling in a
//! second copy of itself, so only downstream crates depend on it.
//!
//! - [`payload`] - Request bodies, complete and with fields removed
//! - [`stub`] - Deterministic [`Classifier`](creditscore_core::Classifier) stand-ins
//! - [`forest`] - A two-tree forest export in the service's model format
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! creditscore-test = { workspace = true }
//! ```

pub mod forest;
pub mod payload;
pub mod stub;

pub use forest::{sample_forest, sample_forest_json};
pub use payload::{sample_payload, sample_payload_without};
pub use stub::{FixedClassifier, RuleClassifier};
