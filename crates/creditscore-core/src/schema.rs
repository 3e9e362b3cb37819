//! Feature schema - the ordered set of inputs the classifier was trained on.
//!
//! Field order is part of the model contract. Reordering, adding or removing a
//! field invalidates every exported model, which is why model files carry their
//! own field list and are checked against [`FeatureSchema::standard`] at load.

use serde::Serialize;

/// Number of features the classifier consumes.
pub const FEATURE_COUNT: usize = 10;

/// Semantic type of a feature value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureType {
    /// A JSON number, or a string holding a finite one.
    Numeric,
}

/// One schema entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureField {
    /// Payload key, e.g. `monthly_inhand_salary`.
    pub name: &'static str,
    /// Column name used when the model was trained, e.g. `Monthly_Inhand_Salary`.
    pub label: &'static str,
    /// Human-readable explanation shown next to the importance chart.
    pub description: &'static str,
    pub kind: FeatureType,
}

impl FeatureField {
    const fn numeric(name: &'static str, label: &'static str, description: &'static str) -> Self {
        Self {
            name,
            label,
            description,
            kind: FeatureType::Numeric,
        }
    }
}

const STANDARD_FIELDS: [FeatureField; FEATURE_COUNT] = [
    FeatureField::numeric(
        "monthly_inhand_salary",
        "Monthly_Inhand_Salary",
        "Représente le salaire net mensuel d'une personne",
    ),
    FeatureField::numeric(
        "num_credit_card",
        "Num_Credit_Card",
        "Représente le nombre d'autres cartes de crédit détenues par la personne",
    ),
    FeatureField::numeric(
        "interest_rate",
        "Interest_Rate",
        "Représente le taux d'intérêt sur la carte de crédit",
    ),
    FeatureField::numeric(
        "delay_from_due_date",
        "Delay_from_due_date",
        "Représente le nombre moyen de jours de retard à partir de la date d'échéance",
    ),
    FeatureField::numeric(
        "num_of_delayed_payment",
        "Num_of_Delayed_Payment",
        "Représente le nombre moyen de paiements retardés par une personne",
    ),
    FeatureField::numeric(
        "num_credit_inquiries",
        "Num_Credit_Inquiries",
        "Représente le nombre de demandes de carte de crédit",
    ),
    FeatureField::numeric(
        "outstanding_debt",
        "Outstanding_Debt",
        "Représente le montant de la dette restante à payer",
    ),
    FeatureField::numeric(
        "credit_history_age",
        "Credit_History_Age",
        "Représente l'ancienneté de l'historique de crédit de la personne",
    ),
    FeatureField::numeric(
        "monthly_balance",
        "Monthly_Balance",
        "Représente le solde mensuel du client",
    ),
    FeatureField::numeric(
        "credit_mix_encoded",
        "Credit_Mix_Encoded",
        "Représente la classification du mix de crédits",
    ),
];

/// The fixed, ordered list of required inputs.
///
/// # Examples
///
/// ```
/// use creditscore_core::FeatureSchema;
///
/// let schema = FeatureSchema::standard();
/// assert_eq!(schema.len(), 10);
/// assert_eq!(schema.position("interest_rate"), Some(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureSchema {
    fields: &'static [FeatureField; FEATURE_COUNT],
}

impl FeatureSchema {
    /// Returns the schema the shipped classifier was trained with.
    pub const fn standard() -> Self {
        Self {
            fields: &STANDARD_FIELDS,
        }
    }

    /// Fields in training order.
    pub fn fields(&self) -> &'static [FeatureField] {
        self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, index: usize) -> Option<&'static FeatureField> {
        self.fields.get(index)
    }

    /// Returns the training position of a payload key.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Payload keys in training order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        let fields: &'static [FeatureField] = self.fields;
        fields.iter().map(|f| f.name)
    }

    /// Training column names in order.
    pub fn labels(&self) -> impl Iterator<Item = &'static str> {
        let fields: &'static [FeatureField] = self.fields;
        fields.iter().map(|f| f.label)
    }
}

impl Default for FeatureSchema {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_order() {
        let names: Vec<_> = FeatureSchema::standard().names().collect();
        assert_eq!(
            names,
            vec![
                "monthly_inhand_salary",
                "num_credit_card",
                "interest_rate",
                "delay_from_due_date",
                "num_of_delayed_payment",
                "num_credit_inquiries",
                "outstanding_debt",
                "credit_history_age",
                "monthly_balance",
                "credit_mix_encoded",
            ]
        );
    }

    #[test]
    fn test_labels_match_names() {
        for field in FeatureSchema::standard().fields() {
            assert_eq!(field.label.to_lowercase(), field.name);
            assert_eq!(field.kind, FeatureType::Numeric);
            assert!(!field.description.is_empty());
        }
    }

    #[test]
    fn test_position_unknown() {
        assert_eq!(FeatureSchema::standard().position("age"), None);
    }
}
