//! Payload validation against the feature schema.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::schema::FeatureSchema;

/// A request body as received from the caller.
pub type RawPayload = Map<String, Value>;

/// Numeric attributes keyed by schema field name.
///
/// Produced only by [`validate`]; always holds exactly the schema's keys.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedAttributes {
    pub(crate) values: BTreeMap<&'static str, f64>,
}

impl ValidatedAttributes {
    pub fn get(&self, field: &str) -> Option<f64> {
        self.values.get(field).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Field names in lexical order. Use the schema for training order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.values.keys().copied()
    }
}

/// Checks `payload` against `schema`, stopping at the first bad field.
///
/// Fields are visited in schema order, so the reported field is the earliest
/// offending one in training order, not in payload order. Keys outside the
/// schema are ignored. Values are not range checked: a negative interest rate
/// passes. Booleans are read as `0` and `1`; magnitudes beyond `f32::MAX` are
/// rejected since the model cannot represent them.
///
/// # Examples
///
/// ```
/// use creditscore_core::{validate, FeatureSchema, ValidationError};
/// use serde_json::json;
///
/// let payload = json!({ "monthly_inhand_salary": 3000 });
/// let err = validate(&FeatureSchema::standard(), payload.as_object().unwrap()).unwrap_err();
/// assert_eq!(err, ValidationError::MissingField { field: "num_credit_card" });
/// ```
pub fn validate(
    schema: &FeatureSchema,
    payload: &RawPayload,
) -> Result<ValidatedAttributes, ValidationError> {
    let mut values = BTreeMap::new();
    for field in schema.fields() {
        let raw = payload
            .get(field.name)
            .ok_or(ValidationError::MissingField { field: field.name })?;
        let number = coerce_numeric(raw).ok_or_else(|| ValidationError::InvalidType {
            field: field.name,
            value: raw.clone(),
        })?;
        values.insert(field.name, number);
    }
    Ok(ValidatedAttributes { values })
}

// Booleans count as 0 or 1. Everything must fit the f32 the trees compare in.
fn coerce_numeric(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(f64::from(u8::from(*b))),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    (number.is_finite() && number.abs() <= f64::from(f32::MAX)).then_some(number)
}
