//! Natural-language rule summaries shown live in the rule builder.

use crate::condition::Condition;
use crate::editor::TriggerRule;

/// Fold a rule into a human-readable sentence.
///
/// Conditions render in insertion order joined with the literal "and" — all
/// conditions are AND-ed, there is no OR. Incomplete conditions are rendered
/// as-is (trailing blank value); completeness is advisory and checked by the
/// caller, never here.
pub fn summarize(rule: &TriggerRule) -> String {
    let event = rule.event.label();
    if rule.conditions.is_empty() {
        return format!("when user {event}");
    }
    let conditions = rule
        .conditions
        .iter()
        .map(render_condition)
        .collect::<Vec<_>>()
        .join(" and ");
    format!("when user {event} and {conditions}")
}

fn render_condition(condition: &Condition) -> String {
    format!(
        "{} {} {}",
        condition.field.label(),
        condition.operator.label(),
        condition.value_text()
    )
}
