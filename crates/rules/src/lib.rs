//! Trigger-rule model — behavioral events, field catalogs, AND-combined
//! condition lists, and live natural-language summaries.

pub mod condition;
pub mod editor;
pub mod events;
pub mod summary;

pub use condition::{
    all_complete, ComparisonOperator, Condition, FieldKind, FilterField,
};
pub use editor::{ConditionPatch, RuleEditor, TriggerRule};
pub use events::TriggerEvent;
pub use summary::summarize;
