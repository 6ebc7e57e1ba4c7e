//! Integration test for a full rule-editing session: build, mutate, and
//! summarize a trigger rule the way the rule-builder screen drives it.

#[cfg(test)]
mod tests {
    use promopilot_rules::{
        all_complete, summarize, ComparisonOperator, ConditionPatch, FilterField, RuleEditor,
        TriggerEvent, TriggerRule,
    };
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_full_editing_session() {
        let snapshots: Arc<Mutex<Vec<TriggerRule>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = snapshots.clone();
        let mut editor = RuleEditor::for_event(TriggerEvent::AddToCart)
            .with_observer(Box::new(move |rule| sink.lock().unwrap().push(rule.clone())));

        // A brand-new rule summarizes to the bare event sentence.
        assert_eq!(
            summarize(editor.rule()),
            "when user adds a product to the cart"
        );

        // Add and fill in a price threshold.
        assert!(editor.add_condition());
        editor.update_condition(
            0,
            ConditionPatch::default()
                .field(FilterField::Price)
                .operator(ComparisonOperator::GreaterThan)
                .value(json!(100)),
        );
        assert_eq!(
            summarize(editor.rule()),
            "when user adds a product to the cart and price is greater than 100"
        );
        assert!(all_complete(&editor.rule().conditions));

        // A second, still-empty condition flips the completeness warning.
        editor.add_condition();
        assert!(!all_complete(&editor.rule().conditions));
        editor.update_condition(
            1,
            ConditionPatch::default()
                .field(FilterField::ProductCategory)
                .value(json!("shoes")),
        );
        assert_eq!(
            summarize(editor.rule()),
            "when user adds a product to the cart and price is greater than 100 \
             and product category is shoes"
        );

        // The parent saw every mutation, each as a complete rule value.
        let seen = snapshots.lock().unwrap();
        assert_eq!(seen.len(), 4);
        assert!(seen.iter().all(|r| r.event == TriggerEvent::AddToCart));

        // Switching events discards conditions scoped to the old catalog.
        drop(seen);
        editor.set_event(TriggerEvent::UserSignup);
        assert!(editor.rule().conditions.is_empty());
        assert_eq!(summarize(editor.rule()), "when user user registers");
    }

    #[test]
    fn test_rule_round_trips_through_json() {
        let mut editor = RuleEditor::for_event(TriggerEvent::Purchase);
        editor.add_condition();
        editor.update_condition(
            0,
            ConditionPatch::default()
                .operator(ComparisonOperator::LessThan)
                .value(json!(50)),
        );

        let encoded = serde_json::to_string(editor.rule()).unwrap();
        let decoded: TriggerRule = serde_json::from_str(&encoded).unwrap();
        assert_eq!(&decoded, editor.rule());
        assert!(encoded.contains("\"purchase\""));
        assert!(encoded.contains("\"less_than\""));
    }
}
