//! PromoPilot Admin — marketing-automation console core.
//!
//! Entry point that loads configuration, installs logging with the warning
//! deny-list, and wires the session and console stores together.

use std::sync::Arc;

use clap::Parser;
use promopilot_console::{ConsoleStore, CreateScenarioRequest};
use promopilot_core::config::{AppConfig, SessionStoreKind};
use promopilot_core::init_logging;
use promopilot_rules::{
    summarize, ComparisonOperator, ConditionPatch, FilterField, RuleEditor, TriggerEvent,
};
use promopilot_session::{
    AccountDirectory, AuthService, Credentials, FileSessionStore, InMemorySessionStore,
    SessionStore,
};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "promopilot-admin")]
#[command(about = "Marketing-automation admin console core")]
#[command(version)]
struct Cli {
    /// Session TTL in hours (overrides config)
    #[arg(long, env = "PROMOPILOT__SESSION__TTL_HOURS")]
    session_ttl_hours: Option<u32>,

    /// Persist sessions to the session file instead of in-memory
    #[arg(long, default_value_t = false)]
    persist_sessions: bool,

    /// Session file path (overrides config)
    #[arg(long, env = "PROMOPILOT__SESSION__FILE_PATH")]
    session_file: Option<String>,

    /// Artificial save latency in milliseconds (overrides config)
    #[arg(long, env = "PROMOPILOT__STORAGE__SAVE_LATENCY_MS")]
    save_latency_ms: Option<u64>,

    /// Seed demo scenarios and response actions
    #[arg(long, default_value_t = false)]
    seed_demo: bool,

    /// Create the default admin account and run a login round-trip
    #[arg(long, default_value_t = false)]
    bootstrap_admin: bool,

    /// Username for the bootstrapped admin account
    #[arg(long, default_value = "admin")]
    admin_user: String,

    /// Password for the bootstrapped admin account
    #[arg(long, default_value = "promopilot")]
    admin_password: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration, remembering any failure until logging is up.
    let (mut config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // Apply CLI overrides
    if let Some(ttl) = cli.session_ttl_hours {
        config.session.ttl_hours = ttl;
    }
    if cli.persist_sessions {
        config.session.store = SessionStoreKind::File;
    }
    if let Some(path) = cli.session_file {
        config.session.file_path = path;
    }
    if let Some(latency) = cli.save_latency_ms {
        config.storage.save_latency_ms = latency;
    }

    init_logging(&config.logging)?;
    if let Some(e) = config_error {
        warn!(error = %e, "Failed to load config, using defaults");
    }

    info!(
        console = %config.console_name,
        session_store = ?config.session.store,
        session_ttl_hours = config.session.ttl_hours,
        save_latency_ms = config.storage.save_latency_ms,
        "Configuration loaded"
    );

    // Session store is chosen by config and injected into the auth service.
    let session_store: Arc<dyn SessionStore> = match config.session.store {
        SessionStoreKind::InMemory => Arc::new(InMemorySessionStore::new()),
        SessionStoreKind::File => Arc::new(FileSessionStore::open(&config.session.file_path)?),
    };
    let directory = AccountDirectory::new();
    if cli.bootstrap_admin {
        directory.bootstrap_admin(&cli.admin_user, &cli.admin_password);
    }
    let auth = AuthService::new(directory, session_store, config.session.ttl_hours);

    let store = ConsoleStore::new(&config.storage);
    if cli.seed_demo {
        store.seed_demo_data();
        demo_scenario_save(&store).await;
    }

    if cli.bootstrap_admin {
        let session = auth.login(&Credentials {
            username: cli.admin_user.clone(),
            password: cli.admin_password.clone(),
        })?;
        info!(
            session_id = %session.session_id,
            active_sessions = auth.active_sessions().len(),
            "Admin login round-trip OK"
        );
        auth.logout(session.session_id)?;
    }

    for scenario in store.list_scenarios() {
        info!(
            name = %scenario.name,
            status = ?scenario.status,
            rule = %summarize(&scenario.rule),
            "Scenario"
        );
    }

    let overview = store.overview();
    info!(
        scenarios = overview.total_scenarios,
        active = overview.active_scenarios,
        actions = overview.total_actions,
        conversion_rate = overview.conversion_rate,
        "PromoPilot Admin is ready"
    );

    Ok(())
}

/// Build a rule through the editor and push it through the delayed save
/// path, the way the rule-builder screen does.
async fn demo_scenario_save(store: &ConsoleStore) {
    let mut editor = RuleEditor::for_event(TriggerEvent::AddToCart);
    editor.add_condition();
    editor.update_condition(
        0,
        ConditionPatch::default()
            .field(FilterField::Price)
            .operator(ComparisonOperator::GreaterThan)
            .value(serde_json::json!(100)),
    );

    let rule = editor.into_rule();
    info!(summary = %summarize(&rule), "Saving demo scenario");
    let saved = store
        .save_scenario(
            CreateScenarioRequest {
                name: "Premium cart follow-up".into(),
                description: "Demo scenario created at startup".into(),
                rule,
                action_ids: Vec::new(),
            },
            "admin",
        )
        .await;
    info!(saved, "Demo scenario save finished");
}
