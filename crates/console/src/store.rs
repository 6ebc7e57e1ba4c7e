//! In-memory console store backed by DashMap.
//!
//! There is no real backend behind the console; saves resolve after an
//! artificial latency to preserve the external-persistence contract, and
//! every write lands in the audit log.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use promopilot_core::config::StorageConfig;
use promopilot_rules::{summarize, TriggerRule};

use crate::actions::{ActionContent, ActionStatus, ResponseAction};

/// Lifecycle status of a marketing scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioStatus {
    Draft,
    Active,
    Paused,
    Archived,
}

/// A trigger rule plus the response actions it fires, as configured in the
/// console.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketingScenario {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub status: ScenarioStatus,
    pub rule: TriggerRule,
    pub action_ids: Vec<Uuid>,
    pub stats: ScenarioStats,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Engagement counters for a scenario.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioStats {
    pub triggered: u64,
    pub popups_shown: u64,
    pub emails_sent: u64,
    pub conversions: u64,
    pub daily: Vec<DailyDataPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyDataPoint {
    pub day: DateTime<Utc>,
    pub triggered: u64,
    pub conversions: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateScenarioRequest {
    pub name: String,
    pub description: String,
    pub rule: TriggerRule,
    #[serde(default)]
    pub action_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateScenarioRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub rule: Option<TriggerRule>,
    pub status: Option<ScenarioStatus>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateActionRequest {
    pub name: String,
    pub content: ActionContent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    Pause,
    Resume,
    Save,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: Uuid,
    pub user: String,
    pub action: AuditAction,
    pub resource_type: String,
    pub resource_id: String,
    pub details: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

/// Thread-safe in-memory store for scenarios, response actions, and the
/// audit log.
pub struct ConsoleStore {
    pub(crate) scenarios: DashMap<Uuid, MarketingScenario>,
    pub(crate) actions: DashMap<Uuid, ResponseAction>,
    audit_log: DashMap<Uuid, AuditLogEntry>,
    save_latency: std::time::Duration,
}

impl ConsoleStore {
    /// An empty store. Demo data is seeded explicitly, not here.
    pub fn new(config: &StorageConfig) -> Self {
        info!(
            save_latency_ms = config.save_latency_ms,
            "Console store initialized (in-memory, development mode)"
        );
        Self {
            scenarios: DashMap::new(),
            actions: DashMap::new(),
            audit_log: DashMap::new(),
            save_latency: std::time::Duration::from_millis(config.save_latency_ms),
        }
    }

    // ─── Scenarios ─────────────────────────────────────────────────────────

    pub fn list_scenarios(&self) -> Vec<MarketingScenario> {
        let mut scenarios: Vec<MarketingScenario> =
            self.scenarios.iter().map(|r| r.value().clone()).collect();
        scenarios.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        scenarios
    }

    pub fn get_scenario(&self, id: Uuid) -> Option<MarketingScenario> {
        self.scenarios.get(&id).map(|r| r.value().clone())
    }

    /// Persist a new scenario. Resolves after the configured artificial
    /// latency with a success flag, matching the external-backend contract.
    pub async fn save_scenario(&self, req: CreateScenarioRequest, user: &str) -> bool {
        tokio::time::sleep(self.save_latency).await;

        let now = Utc::now();
        let scenario = MarketingScenario {
            id: Uuid::new_v4(),
            name: req.name,
            description: req.description,
            status: ScenarioStatus::Draft,
            rule: req.rule,
            action_ids: req.action_ids,
            stats: ScenarioStats::default(),
            created_at: now,
            updated_at: now,
        };
        let id = scenario.id;
        info!(
            scenario_id = %id,
            summary = %summarize(&scenario.rule),
            "Scenario saved"
        );
        self.scenarios.insert(id, scenario.clone());
        self.log_audit(
            user,
            AuditAction::Save,
            "scenario",
            &id.to_string(),
            serde_json::json!({"name": &scenario.name}),
        );
        metrics::counter!("console.scenario_saves").increment(1);
        true
    }

    pub fn update_scenario(
        &self,
        id: Uuid,
        req: UpdateScenarioRequest,
        user: &str,
    ) -> Option<MarketingScenario> {
        self.scenarios.get_mut(&id).map(|mut entry| {
            let s = entry.value_mut();
            if let Some(name) = req.name {
                s.name = name;
            }
            if let Some(description) = req.description {
                s.description = description;
            }
            if let Some(rule) = req.rule {
                s.rule = rule;
            }
            if let Some(status) = req.status {
                s.status = status;
            }
            s.updated_at = Utc::now();
            self.log_audit(
                user,
                AuditAction::Update,
                "scenario",
                &id.to_string(),
                serde_json::json!({}),
            );
            s.clone()
        })
    }

    pub fn delete_scenario(&self, id: Uuid, user: &str) -> bool {
        let removed = self.scenarios.remove(&id).is_some();
        if removed {
            self.log_audit(
                user,
                AuditAction::Delete,
                "scenario",
                &id.to_string(),
                serde_json::json!({}),
            );
        }
        removed
    }

    pub fn pause_scenario(&self, id: Uuid, user: &str) -> Option<MarketingScenario> {
        self.scenarios.get_mut(&id).map(|mut entry| {
            entry.value_mut().status = ScenarioStatus::Paused;
            entry.value_mut().updated_at = Utc::now();
            self.log_audit(
                user,
                AuditAction::Pause,
                "scenario",
                &id.to_string(),
                serde_json::json!({}),
            );
            entry.value().clone()
        })
    }

    pub fn resume_scenario(&self, id: Uuid, user: &str) -> Option<MarketingScenario> {
        self.scenarios.get_mut(&id).map(|mut entry| {
            entry.value_mut().status = ScenarioStatus::Active;
            entry.value_mut().updated_at = Utc::now();
            self.log_audit(
                user,
                AuditAction::Resume,
                "scenario",
                &id.to_string(),
                serde_json::json!({}),
            );
            entry.value().clone()
        })
    }

    // ─── Response actions ──────────────────────────────────────────────────

    pub fn list_actions(&self) -> Vec<ResponseAction> {
        let mut actions: Vec<ResponseAction> =
            self.actions.iter().map(|r| r.value().clone()).collect();
        actions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        actions
    }

    pub fn get_action(&self, id: Uuid) -> Option<ResponseAction> {
        self.actions.get(&id).map(|r| r.value().clone())
    }

    pub fn create_action(&self, req: CreateActionRequest, user: &str) -> ResponseAction {
        let now = Utc::now();
        let action = ResponseAction {
            id: Uuid::new_v4(),
            name: req.name,
            status: ActionStatus::Draft,
            content: req.content,
            created_at: now,
            updated_at: now,
        };
        let id = action.id;
        self.actions.insert(id, action.clone());
        self.log_audit(
            user,
            AuditAction::Create,
            "action",
            &id.to_string(),
            serde_json::json!({"name": &action.name, "kind": action.content.kind()}),
        );
        action
    }

    pub fn set_action_status(
        &self,
        id: Uuid,
        status: ActionStatus,
        user: &str,
    ) -> Option<ResponseAction> {
        self.actions.get_mut(&id).map(|mut entry| {
            entry.value_mut().status = status;
            entry.value_mut().updated_at = Utc::now();
            self.log_audit(
                user,
                AuditAction::Update,
                "action",
                &id.to_string(),
                serde_json::json!({"status": status}),
            );
            entry.value().clone()
        })
    }

    /// Delete an action and detach it from every scenario referencing it.
    pub fn delete_action(&self, id: Uuid, user: &str) -> bool {
        let removed = self.actions.remove(&id).is_some();
        if removed {
            for mut entry in self.scenarios.iter_mut() {
                entry.value_mut().action_ids.retain(|a| *a != id);
            }
            self.log_audit(
                user,
                AuditAction::Delete,
                "action",
                &id.to_string(),
                serde_json::json!({}),
            );
        }
        removed
    }

    pub fn attach_action(&self, scenario_id: Uuid, action_id: Uuid, user: &str) -> bool {
        if !self.actions.contains_key(&action_id) {
            return false;
        }
        match self.scenarios.get_mut(&scenario_id) {
            Some(mut entry) => {
                let s = entry.value_mut();
                if !s.action_ids.contains(&action_id) {
                    s.action_ids.push(action_id);
                    s.updated_at = Utc::now();
                    self.log_audit(
                        user,
                        AuditAction::Update,
                        "scenario",
                        &scenario_id.to_string(),
                        serde_json::json!({"attached_action": action_id}),
                    );
                }
                true
            }
            None => false,
        }
    }

    // ─── Audit log ─────────────────────────────────────────────────────────

    pub fn get_audit_log(&self) -> Vec<AuditLogEntry> {
        let mut entries: Vec<AuditLogEntry> =
            self.audit_log.iter().map(|r| r.value().clone()).collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries
    }

    fn log_audit(
        &self,
        user: &str,
        action: AuditAction,
        resource_type: &str,
        resource_id: &str,
        details: serde_json::Value,
    ) {
        let entry = AuditLogEntry {
            id: Uuid::new_v4(),
            user: user.to_string(),
            action,
            resource_type: resource_type.to_string(),
            resource_id: resource_id.to_string(),
            details,
            timestamp: Utc::now(),
        };
        self.audit_log.insert(entry.id, entry);
    }

    // ─── Demo data ─────────────────────────────────────────────────────────

    /// Seed demo scenarios and actions. Explicit, for development setups.
    pub fn seed_demo_data(&self) {
        use chrono::Duration;
        use promopilot_rules::{
            ComparisonOperator, Condition, FilterField, TriggerEvent,
        };

        let now = Utc::now();

        let popup = self.create_action(
            CreateActionRequest {
                name: "Cart rescue popup".into(),
                content: ActionContent::Popup {
                    title: "Still thinking it over?".into(),
                    body: "Your cart is waiting — checkout in one click.".into(),
                    image_url: Some("https://cdn.promopilot.io/assets/cart-rescue.png".into()),
                    cta_text: "Back to cart".into(),
                    cta_url: "/cart".into(),
                    display_secs: 15,
                },
            },
            "seed",
        );
        let email = self.create_action(
            CreateActionRequest {
                name: "Welcome email".into(),
                content: ActionContent::Email {
                    subject: "Welcome to the store".into(),
                    preheader: Some("Here is 10% off your first order".into()),
                    body_template: "Hi {{first_name}}, thanks for signing up!".into(),
                    sender: "hello@promopilot.io".into(),
                },
            },
            "seed",
        );
        self.set_action_status(popup.id, ActionStatus::Active, "seed");
        self.set_action_status(email.id, ActionStatus::Active, "seed");

        let scenarios = vec![
            (
                "High-value cart nudge",
                "Popup for carts above the free-shipping threshold",
                ScenarioStatus::Active,
                TriggerRule {
                    event: TriggerEvent::AddToCart,
                    conditions: vec![Condition {
                        field: FilterField::Price,
                        operator: ComparisonOperator::GreaterThan,
                        value: serde_json::json!(50),
                    }],
                },
                vec![popup.id],
                (12_400u64, 9_800u64, 0u64, 740u64),
            ),
            (
                "New-user welcome",
                "Email sequence entry point for fresh signups",
                ScenarioStatus::Active,
                TriggerRule::new(TriggerEvent::UserSignup),
                vec![email.id],
                (3_100, 0, 3_050, 420),
            ),
            (
                "Exit-intent saver",
                "Last-chance popup when a visitor is about to leave",
                ScenarioStatus::Paused,
                TriggerRule::new(TriggerEvent::ExitIntent),
                vec![popup.id],
                (8_700, 8_100, 0, 310),
            ),
        ];

        for (name, description, status, rule, action_ids, counts) in scenarios {
            let id = Uuid::new_v4();
            let (triggered, popups_shown, emails_sent, conversions) = counts;
            let daily: Vec<DailyDataPoint> = (0..7)
                .map(|d| DailyDataPoint {
                    day: now - Duration::days(7 - d),
                    triggered: triggered / 7,
                    conversions: conversions / 7,
                })
                .collect();
            self.scenarios.insert(
                id,
                MarketingScenario {
                    id,
                    name: name.to_string(),
                    description: description.to_string(),
                    status,
                    rule,
                    action_ids,
                    stats: ScenarioStats {
                        triggered,
                        popups_shown,
                        emails_sent,
                        conversions,
                        daily,
                    },
                    created_at: now - Duration::days(21),
                    updated_at: now,
                },
            );
        }
        info!(
            scenarios = self.scenarios.len(),
            actions = self.actions.len(),
            "Demo data seeded"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use promopilot_rules::TriggerEvent;

    fn store() -> ConsoleStore {
        ConsoleStore::new(&StorageConfig { save_latency_ms: 20 })
    }

    fn scenario_request(name: &str) -> CreateScenarioRequest {
        CreateScenarioRequest {
            name: name.into(),
            description: "test scenario".into(),
            rule: TriggerRule::new(TriggerEvent::PageView),
            action_ids: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_save_resolves_after_latency() {
        let store = store();
        let started = std::time::Instant::now();
        assert!(store.save_scenario(scenario_request("Latency"), "admin").await);
        assert!(started.elapsed() >= std::time::Duration::from_millis(20));
        assert_eq!(store.list_scenarios().len(), 1);
    }

    #[tokio::test]
    async fn test_scenario_lifecycle() {
        let store = store();
        store.save_scenario(scenario_request("Lifecycle"), "admin").await;
        let id = store.list_scenarios()[0].id;

        let updated = store
            .update_scenario(
                id,
                UpdateScenarioRequest {
                    status: Some(ScenarioStatus::Active),
                    ..Default::default()
                },
                "admin",
            )
            .unwrap();
        assert_eq!(updated.status, ScenarioStatus::Active);

        assert_eq!(
            store.pause_scenario(id, "admin").unwrap().status,
            ScenarioStatus::Paused
        );
        assert_eq!(
            store.resume_scenario(id, "admin").unwrap().status,
            ScenarioStatus::Active
        );

        assert!(store.delete_scenario(id, "admin"));
        assert!(store.get_scenario(id).is_none());

        let log = store.get_audit_log();
        assert!(log.iter().any(|e| e.action == AuditAction::Save));
        assert!(log.iter().any(|e| e.action == AuditAction::Delete));
    }

    #[tokio::test]
    async fn test_delete_action_detaches_from_scenarios() {
        let store = store();
        let action = store.create_action(
            CreateActionRequest {
                name: "Popup".into(),
                content: ActionContent::Popup {
                    title: "Hi".into(),
                    body: "Hello".into(),
                    image_url: None,
                    cta_text: "Go".into(),
                    cta_url: "/".into(),
                    display_secs: 10,
                },
            },
            "admin",
        );

        store.save_scenario(scenario_request("Holder"), "admin").await;
        let scenario_id = store.list_scenarios()[0].id;
        assert!(store.attach_action(scenario_id, action.id, "admin"));
        assert_eq!(store.get_scenario(scenario_id).unwrap().action_ids.len(), 1);

        assert!(store.delete_action(action.id, "admin"));
        assert!(store.get_scenario(scenario_id).unwrap().action_ids.is_empty());
    }

    #[test]
    fn test_attach_requires_existing_action() {
        let store = store();
        assert!(!store.attach_action(Uuid::new_v4(), Uuid::new_v4(), "admin"));
    }

    #[test]
    fn test_seeded_demo_data() {
        let store = store();
        store.seed_demo_data();
        assert_eq!(store.list_scenarios().len(), 3);
        assert_eq!(store.list_actions().len(), 2);
        // Every attached action id resolves.
        for scenario in store.list_scenarios() {
            for action_id in &scenario.action_ids {
                assert!(store.get_action(*action_id).is_some());
            }
        }
    }
}
