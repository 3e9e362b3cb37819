//! Tests for payload validation

use proptest::prelude::*;
use serde_json::{json, Value};

use super::error::ValidationError;
use super::schema::FeatureSchema;
use super::validate::*;

fn sample_payload() -> RawPayload {
    let value = json!({
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
    });
    match value {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}

#[test]
fn test_valid_payload_has_schema_keys() {
    let schema = FeatureSchema::standard();
    let attrs = validate(&schema, &sample_payload()).unwrap();

    assert_eq!(attrs.len(), 10);
    let mut expected: Vec<_> = schema.names().collect();
    expected.sort_unstable();
    assert_eq!(attrs.keys().collect::<Vec<_>>(), expected);
    assert_eq!(attrs.get("outstanding_debt"), Some(500.0));
}

#[test]
fn test_missing_outstanding_debt() {
    let mut payload = sample_payload();
    payload.remove("outstanding_debt");

    let err = validate(&FeatureSchema::standard(), &payload).unwrap_err();
    assert_eq!(
        err,
        ValidationError::MissingField {
            field: "outstanding_debt"
        }
    );
    assert_eq!(err.kind(), "missing_field");
}

#[test]
fn test_first_missing_field_in_schema_order() {
    let mut payload = sample_payload();
    payload.remove("credit_mix_encoded");
    payload.remove("num_credit_card");

    let err = validate(&FeatureSchema::standard(), &payload).unwrap_err();
    assert_eq!(err.field(), "num_credit_card");
}

#[test]
fn test_invalid_type_reports_value() {
    let mut payload = sample_payload();
    payload.insert("interest_rate".to_string(), json!("douze"));

    let err = validate(&FeatureSchema::standard(), &payload).unwrap_err();
    assert_eq!(
        err,
        ValidationError::InvalidType {
            field: "interest_rate",
            value: json!("douze"),
        }
    );
    assert_eq!(err.kind(), "invalid_type");
}

#[test]
fn test_missing_reported_before_later_invalid() {
    let mut payload = sample_payload();
    payload.remove("num_credit_card");
    payload.insert("monthly_balance".to_string(), json!(null));

    let err = validate(&FeatureSchema::standard(), &payload).unwrap_err();
    assert_eq!(err.field(), "num_credit_card");
}

#[test]
fn test_numeric_strings_are_coerced() {
    let mut payload = sample_payload();
    payload.insert("monthly_balance".to_string(), json!(" 1250.5 "));

    let attrs = validate(&FeatureSchema::standard(), &payload).unwrap();
    assert_eq!(attrs.get("monthly_balance"), Some(1250.5));
}

#[test]
fn test_non_numeric_values_rejected() {
    for bad in [json!(null), json!([1]), json!({"v": 1}), json!("NaN"), json!(""), json!("inf")] {
        let mut payload = sample_payload();
        payload.insert("credit_history_age".to_string(), bad.clone());

        let err = validate(&FeatureSchema::standard(), &payload).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidType {
                field: "credit_history_age",
                value: bad,
            }
        );
    }
}

#[test]
fn test_booleans_are_coerced() {
    let mut payload = sample_payload();
    payload.insert("credit_mix_encoded".to_string(), json!(true));
    payload.insert("num_credit_inquiries".to_string(), json!(false));

    let attrs = validate(&FeatureSchema::standard(), &payload).unwrap();
    assert_eq!(attrs.get("credit_mix_encoded"), Some(1.0));
    assert_eq!(attrs.get("num_credit_inquiries"), Some(0.0));
}

#[test]
fn test_values_beyond_f32_rejected() {
    for bad in [json!(1e39), json!(-1e39), json!("3.5e38")] {
        let mut payload = sample_payload();
        payload.insert("outstanding_debt".to_string(), bad.clone());

        let err = validate(&FeatureSchema::standard(), &payload).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidType {
                field: "outstanding_debt",
                value: bad,
            }
        );
    }
}

#[test]
fn test_f32_max_accepted() {
    let mut payload = sample_payload();
    payload.insert("outstanding_debt".to_string(), json!(f64::from(f32::MAX)));

    let attrs = validate(&FeatureSchema::standard(), &payload).unwrap();
    assert_eq!(attrs.get("outstanding_debt"), Some(f64::from(f32::MAX)));
}

#[test]
fn test_no_range_checks() {
    let mut payload = sample_payload();
    payload.insert("interest_rate".to_string(), json!(-4.5));

    let attrs = validate(&FeatureSchema::standard(), &payload).unwrap();
    assert_eq!(attrs.get("interest_rate"), Some(-4.5));
}

#[test]
fn test_extra_keys_ignored() {
    let mut payload = sample_payload();
    payload.insert("nickname".to_string(), json!("bob"));

    let attrs = validate(&FeatureSchema::standard(), &payload).unwrap();
    assert_eq!(attrs.len(), 10);
    assert_eq!(attrs.get("nickname"), None);
}

#[test]
fn test_error_message_names_field() {
    let err = ValidationError::MissingField {
        field: "monthly_balance",
    };
    assert_eq!(
        err.to_string(),
        "La clé \"monthly_balance\" est manquante dans les données."
    );
}

proptest! {
    #[test]
    fn prop_missing_any_field_is_reported(index in 0usize..10, drop_others in proptest::collection::vec(any::<bool>(), 10)) {
        let schema = FeatureSchema::standard();
        let mut payload = sample_payload();
        let target = schema.field(index).unwrap().name;
        payload.remove(target);
        // Only fields after the target may also be dropped.
        for (i, drop) in drop_others.iter().enumerate() {
            if *drop && i > index {
                payload.remove(schema.field(i).unwrap().name);
            }
        }

        let err = validate(&schema, &payload).unwrap_err();
        prop_assert_eq!(err, ValidationError::MissingField { field: target });
    }

    #[test]
    fn prop_any_finite_numbers_validate(values in proptest::collection::vec(-1.0e9f64..1.0e9, 10)) {
        let schema = FeatureSchema::standard();
        let payload: RawPayload = schema
            .names()
            .zip(values.iter())
            .map(|(name, v)| (name.to_string(), json!(v)))
            .collect();

        let attrs = validate(&schema, &payload).unwrap();
        prop_assert_eq!(attrs.len(), schema.len());
        for (name, v) in schema.names().zip(values.iter()) {
            prop_assert_eq!(attrs.get(name), Some(*v));
        }
    }
}
