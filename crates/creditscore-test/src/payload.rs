//! Request body fixtures.
//!
//! # Example
//!
//! ```
//! use creditscore_test::payload::{sample_payload, sample_payload_without};
//!
//! assert_eq!(sample_payload().len(), 10);
//! assert!(!sample_payload_without("outstanding_debt").contains_key("outstanding_debt"));
//! ```

use creditscore_core::RawPayload;
use serde_json::{json, Value};

/// The reference applicant: every field present and numeric.
pub fn sample_payload_value() -> Value {
    json!({
        "monthly_inhand_salary": 3000,
        "num_credit_card": 2,
        "interest_rate": 12,
        "delay_from_due_date": 5,
        "num_of_delayed_payment": 1,
        "num_credit_inquiries": 3,
        "outstanding_debt": 500,
        "credit_history_age": 24,
        "monthly_balance": 1000,
        "credit_mix_encoded": 1
    })
}

/// [`sample_payload_value`] as a [`RawPayload`].
pub fn sample_payload() -> RawPayload {
    match sample_payload_value() {
        Value::Object(map) => map,
        _ => RawPayload::new(),
    }
}

/// The reference applicant with one field removed.
pub fn sample_payload_without(field: &str) -> RawPayload {
    let mut payload = sample_payload();
    payload.remove(field);
    payload
}

/// The reference applicant with one field replaced.
pub fn sample_payload_with(field: &str, value: Value) -> RawPayload {
    let mut payload = sample_payload();
    payload.insert(field.to_string(), value);
    payload
}
