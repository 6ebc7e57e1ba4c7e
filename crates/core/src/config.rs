use serde::Deserialize;

/// Root application configuration. Loaded from environment variables
/// with the prefix `PROMOPILOT__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_console_name")]
    pub console_name: String,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Admin session settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_ttl_hours")]
    pub ttl_hours: u32,
    #[serde(default)]
    pub store: SessionStoreKind,
    #[serde(default = "default_session_file")]
    pub file_path: String,
}

/// Which session store implementation the console runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionStoreKind {
    #[default]
    InMemory,
    File,
}

/// Scenario store settings. The store is in-memory; saves resolve after an
/// artificial latency to match the external-backend contract.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_save_latency_ms")]
    pub save_latency_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_directive")]
    pub directive: String,
    #[serde(default = "default_log_json")]
    pub json: bool,
    /// Warning codes (event targets) silenced at subscriber level.
    #[serde(default = "default_suppressed_warnings")]
    pub suppressed_warnings: Vec<String>,
}

// Default functions
fn default_console_name() -> String {
    "PromoPilot Admin".to_string()
}
fn default_session_ttl_hours() -> u32 {
    8
}
fn default_session_file() -> String {
    "promopilot-sessions.json".to_string()
}
fn default_save_latency_ms() -> u64 {
    300
}
fn default_log_directive() -> String {
    "promopilot=info".to_string()
}
fn default_log_json() -> bool {
    false
}
fn default_suppressed_warnings() -> Vec<String> {
    vec!["chartkit::deprecated".to_string()]
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_hours: default_session_ttl_hours(),
            store: SessionStoreKind::default(),
            file_path: default_session_file(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            save_latency_ms: default_save_latency_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directive: default_log_directive(),
            json: default_log_json(),
            suppressed_warnings: default_suppressed_warnings(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            console_name: default_console_name(),
            session: SessionConfig::default(),
            storage: StorageConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("PROMOPILOT")
                .separator("__")
                .try_parsing(true)
                .list_separator(","),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
