//! Rule editor — the condition-list model behind the rule-builder screen.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::condition::{ComparisonOperator, Condition, FilterField};
use crate::events::TriggerEvent;

/// An event selection plus an AND-combined list of conditions defining when
/// a marketing action fires. No OR support, no grouping, no nesting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerRule {
    pub event: TriggerEvent,
    pub conditions: Vec<Condition>,
}

impl TriggerRule {
    /// A fresh rule for an event, with no conditions yet.
    pub fn new(event: TriggerEvent) -> Self {
        Self {
            event,
            conditions: Vec::new(),
        }
    }
}

/// Partial overrides merged into an existing condition.
#[derive(Debug, Clone, Default)]
pub struct ConditionPatch {
    pub field: Option<FilterField>,
    pub operator: Option<ComparisonOperator>,
    pub value: Option<serde_json::Value>,
}

impl ConditionPatch {
    pub fn field(mut self, field: FilterField) -> Self {
        self.field = Some(field);
        self
    }

    pub fn operator(mut self, operator: ComparisonOperator) -> Self {
        self.operator = Some(operator);
        self
    }

    pub fn value(mut self, value: serde_json::Value) -> Self {
        self.value = Some(value);
        self
    }
}

type ChangeObserver = Box<dyn Fn(&TriggerRule) + Send + Sync>;

/// Single-owner editing session over a [`TriggerRule`].
///
/// Every mutation synchronously hands a freshly cloned rule to the observer,
/// not just an explicit save — the parent owns persistence. Invariants held
/// here: a condition's field always belongs to the current event's catalog,
/// and its operator is always valid for the field's kind.
pub struct RuleEditor {
    rule: TriggerRule,
    observer: Option<ChangeObserver>,
}

impl RuleEditor {
    pub fn new(rule: TriggerRule) -> Self {
        Self {
            rule,
            observer: None,
        }
    }

    /// Start an editing session with an empty rule for the given event.
    pub fn for_event(event: TriggerEvent) -> Self {
        Self::new(TriggerRule::new(event))
    }

    pub fn with_observer(mut self, observer: ChangeObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn rule(&self) -> &TriggerRule {
        &self.rule
    }

    pub fn into_rule(self) -> TriggerRule {
        self.rule
    }

    /// Switch the rule to a new event. Conditions are event-scoped, so the
    /// whole list is cleared. Selecting the current event again is a no-op.
    pub fn set_event(&mut self, event: TriggerEvent) {
        if self.rule.event == event {
            return;
        }
        debug!(
            event = ?event,
            dropped_conditions = self.rule.conditions.len(),
            "Rule event changed, conditions reset"
        );
        self.rule.event = event;
        self.rule.conditions.clear();
        self.notify();
    }

    /// Append a condition seeded with the first field the current event
    /// offers. Returns `false` when the event has no filterable fields.
    pub fn add_condition(&mut self) -> bool {
        let Some(field) = self.rule.event.fields().first() else {
            return false;
        };
        self.rule.conditions.push(Condition::seeded(*field));
        self.notify();
        true
    }

    /// Merge a patch into the condition at `index`. A field outside the
    /// current event's catalog is rejected. When the merged operator is not
    /// valid for the merged field's kind, it is reset to the default, so an
    /// invalid field/operator pair can never be observed.
    ///
    /// Returns the updated condition, `None` for an out-of-range index or a
    /// rejected field.
    pub fn update_condition(&mut self, index: usize, patch: ConditionPatch) -> Option<Condition> {
        if let Some(field) = patch.field {
            if !self.rule.event.fields().contains(&field) {
                debug!(field = ?field, event = ?self.rule.event, "Rejected field outside event catalog");
                return None;
            }
        }

        let condition = self.rule.conditions.get_mut(index)?;
        if let Some(field) = patch.field {
            condition.field = field;
        }
        if let Some(operator) = patch.operator {
            condition.operator = operator;
        }
        if let Some(value) = patch.value {
            condition.value = value;
        }
        if !condition.operator.is_valid_for(condition.field.kind()) {
            condition.operator = ComparisonOperator::DEFAULT;
        }

        let updated = condition.clone();
        self.notify();
        Some(updated)
    }

    /// Delete the condition at `index`, keeping the relative order of the
    /// rest. Returns `false` for an out-of-range index.
    pub fn remove_condition(&mut self, index: usize) -> bool {
        if index >= self.rule.conditions.len() {
            return false;
        }
        self.rule.conditions.remove(index);
        self.notify();
        true
    }

    fn notify(&self) {
        if let Some(observer) = &self.observer {
            observer(&self.rule);
        }
    }
}
