//! Filter fields, comparison operators, and single-condition types.

use serde::{Deserialize, Serialize};

/// An attribute of an event payload usable in a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterField {
    PageUrl,
    PageTitle,
    Referrer,
    SearchTerm,
    ProductName,
    ProductCategory,
    Price,
    Quantity,
    OrderTotal,
    PaymentMethod,
    SignupMethod,
    DeviceType,
}

/// Type class of a filter field. Numeric fields admit ordering operators,
/// text fields do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Numeric,
    Text,
}

impl FilterField {
    pub const ALL: [FilterField; 12] = [
        FilterField::PageUrl,
        FilterField::PageTitle,
        FilterField::Referrer,
        FilterField::SearchTerm,
        FilterField::ProductName,
        FilterField::ProductCategory,
        FilterField::Price,
        FilterField::Quantity,
        FilterField::OrderTotal,
        FilterField::PaymentMethod,
        FilterField::SignupMethod,
        FilterField::DeviceType,
    ];

    pub fn kind(&self) -> FieldKind {
        match self {
            FilterField::Price | FilterField::Quantity | FilterField::OrderTotal => {
                FieldKind::Numeric
            }
            _ => FieldKind::Text,
        }
    }

    /// Human-readable label used in rule summaries.
    pub fn label(&self) -> &'static str {
        match self {
            FilterField::PageUrl => "page URL",
            FilterField::PageTitle => "page title",
            FilterField::Referrer => "referrer",
            FilterField::SearchTerm => "search term",
            FilterField::ProductName => "product name",
            FilterField::ProductCategory => "product category",
            FilterField::Price => "price",
            FilterField::Quantity => "quantity",
            FilterField::OrderTotal => "order total",
            FilterField::PaymentMethod => "payment method",
            FilterField::SignupMethod => "signup method",
            FilterField::DeviceType => "device type",
        }
    }
}

/// How a condition compares a field against its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOperator {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    GreaterThan,
    LessThan,
}

impl ComparisonOperator {
    /// Default operator seeded into a new condition, valid for every kind.
    pub const DEFAULT: ComparisonOperator = ComparisonOperator::Equals;

    const NON_ORDERING: [ComparisonOperator; 4] = [
        ComparisonOperator::Equals,
        ComparisonOperator::NotEquals,
        ComparisonOperator::Contains,
        ComparisonOperator::NotContains,
    ];

    const ALL: [ComparisonOperator; 6] = [
        ComparisonOperator::Equals,
        ComparisonOperator::NotEquals,
        ComparisonOperator::Contains,
        ComparisonOperator::NotContains,
        ComparisonOperator::GreaterThan,
        ComparisonOperator::LessThan,
    ];

    /// Operators a field of the given kind admits.
    pub fn allowed_for(kind: FieldKind) -> &'static [ComparisonOperator] {
        match kind {
            FieldKind::Numeric => &Self::ALL,
            FieldKind::Text => &Self::NON_ORDERING,
        }
    }

    pub fn is_valid_for(&self, kind: FieldKind) -> bool {
        Self::allowed_for(kind).contains(self)
    }

    /// Human-readable label used in rule summaries.
    pub fn label(&self) -> &'static str {
        match self {
            ComparisonOperator::Equals => "is",
            ComparisonOperator::NotEquals => "is not",
            ComparisonOperator::Contains => "contains",
            ComparisonOperator::NotContains => "does not contain",
            ComparisonOperator::GreaterThan => "is greater than",
            ComparisonOperator::LessThan => "is less than",
        }
    }
}

/// A single field/operator/value comparison within a rule.
///
/// Values are JSON scalars: text fields carry strings, numeric fields
/// numbers. A freshly added condition starts with an empty string value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub field: FilterField,
    pub operator: ComparisonOperator,
    pub value: serde_json::Value,
}

impl Condition {
    /// Seed a new condition for a field: default operator, empty value.
    pub fn seeded(field: FilterField) -> Self {
        Self {
            field,
            operator: ComparisonOperator::DEFAULT,
            value: serde_json::Value::String(String::new()),
        }
    }

    /// A condition is complete once its value has been filled in. Field and
    /// operator are always set, so completeness hinges on the value alone.
    pub fn is_complete(&self) -> bool {
        match &self.value {
            serde_json::Value::Null => false,
            serde_json::Value::String(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// The value as it appears in a rule summary. Empty values render as an
    /// empty string; completeness is the caller's concern.
    pub fn value_text(&self) -> String {
        match &self.value {
            serde_json::Value::Null => String::new(),
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Whether every condition in the list is complete. Vacuously true for an
/// empty list.
pub fn all_complete(conditions: &[Condition]) -> bool {
    conditions.iter().all(Condition::is_complete)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operator_sets_by_kind() {
        assert_eq!(ComparisonOperator::allowed_for(FieldKind::Numeric).len(), 6);
        let text_ops = ComparisonOperator::allowed_for(FieldKind::Text);
        assert_eq!(text_ops.len(), 4);
        assert!(!text_ops.contains(&ComparisonOperator::GreaterThan));
        assert!(!text_ops.contains(&ComparisonOperator::LessThan));
    }

    #[test]
    fn test_numeric_fields_admit_ordering() {
        for field in [
            FilterField::Price,
            FilterField::Quantity,
            FilterField::OrderTotal,
        ] {
            assert_eq!(field.kind(), FieldKind::Numeric);
            assert!(ComparisonOperator::GreaterThan.is_valid_for(field.kind()));
        }
        assert_eq!(FilterField::PageUrl.kind(), FieldKind::Text);
        assert!(!ComparisonOperator::LessThan.is_valid_for(FieldKind::Text));
    }

    #[test]
    fn test_seeded_condition_is_incomplete() {
        let condition = Condition::seeded(FilterField::Price);
        assert_eq!(condition.operator, ComparisonOperator::Equals);
        assert!(!condition.is_complete());
    }

    #[test]
    fn test_completeness() {
        let mut condition = Condition::seeded(FilterField::SearchTerm);
        condition.value = json!("sneakers");
        assert!(condition.is_complete());

        condition.value = json!(0);
        assert!(condition.is_complete());

        condition.value = serde_json::Value::Null;
        assert!(!condition.is_complete());
    }

    #[test]
    fn test_all_complete_vacuous_on_empty_list() {
        assert!(all_complete(&[]));

        let incomplete = Condition::seeded(FilterField::Price);
        assert!(!all_complete(&[incomplete]));
    }
}
