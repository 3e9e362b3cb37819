//! Feature vector assembly in training order.

use std::ops::Index;

use serde::Serialize;

use crate::error::{CreditScoreError, Result};
use crate::schema::{FeatureSchema, FEATURE_COUNT};
use crate::validate::ValidatedAttributes;

/// Classifier input: one value per schema field, in schema order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Wraps values that are already in training order.
    pub const fn from_ordered(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Index<usize> for FeatureVector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

/// Projects validated attributes onto the schema order.
///
/// Attributes that do not match the schema can only come from a bug upstream,
/// so the mismatch is reported as [`CreditScoreError::InternalInvariant`].
pub fn build(schema: &FeatureSchema, attrs: &ValidatedAttributes) -> Result<FeatureVector> {
    if schema.len() != FEATURE_COUNT || attrs.len() != schema.len() {
        return Err(CreditScoreError::InternalInvariant(format!(
            "attribute count {} does not match schema length {}",
            attrs.len(),
            schema.len()
        )));
    }

    let mut values = [0.0; FEATURE_COUNT];
    for (slot, field) in values.iter_mut().zip(schema.fields()) {
        *slot = attrs.get(field.name).ok_or_else(|| {
            CreditScoreError::InternalInvariant(format!(
                "validated attributes lack schema field {}",
                field.name
            ))
        })?;
    }
    Ok(FeatureVector(values))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use proptest::prelude::*;
    use serde_json::{json, Map, Value};

    use super::*;
    use crate::validate::validate;

    #[test]
    fn test_build_uses_schema_order() {
        // Keys deliberately listed in reverse training order.
        let payload = json!({
            "credit_mix_encoded": 1,
            "monthly_balance": 1000,
            "credit_history_age": 24,
            "outstanding_debt": 500,
            "num_credit_inquiries": 3,
            "num_of_delayed_payment": 1,
            "delay_from_due_date": 5,
            "interest_rate": 12,
            "num_credit_card": 2,
            "monthly_inhand_salary": 3000
        });
        let schema = FeatureSchema::standard();
        let attrs = validate(&schema, payload.as_object().unwrap()).unwrap();

        let vector = build(&schema, &attrs).unwrap();
        assert_eq!(
            vector.as_slice(),
            &[3000.0, 2.0, 12.0, 5.0, 1.0, 3.0, 500.0, 24.0, 1000.0, 1.0]
        );
        assert_eq!(vector[6], 500.0);
    }

    #[test]
    fn test_build_rejects_foreign_keys() {
        let schema = FeatureSchema::standard();
        let mut values = BTreeMap::new();
        for name in schema.names().take(9) {
            values.insert(name, 1.0);
        }
        values.insert("age", 40.0);
        let attrs = ValidatedAttributes { values };

        let err = build(&schema, &attrs).unwrap_err();
        assert!(matches!(err, CreditScoreError::InternalInvariant(_)));
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_build_rejects_short_attributes() {
        let schema = FeatureSchema::standard();
        let attrs = ValidatedAttributes {
            values: BTreeMap::from([("monthly_inhand_salary", 1.0)]),
        };

        assert!(matches!(
            build(&schema, &attrs),
            Err(CreditScoreError::InternalInvariant(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_order_independent_of_payload(
            values in proptest::collection::vec(-1.0e6f64..1.0e6, 10),
            order in Just((0..10).collect::<Vec<usize>>()).prop_shuffle(),
        ) {
            let schema = FeatureSchema::standard();
            let mut payload = Map::new();
            for &i in &order {
                payload.insert(schema.field(i).unwrap().name.to_string(), Value::from(values[i]));
            }

            let attrs = validate(&schema, &payload).unwrap();
            let vector = build(&schema, &attrs).unwrap();
            prop_assert_eq!(vector.as_slice(), values.as_slice());
        }
    }
}
