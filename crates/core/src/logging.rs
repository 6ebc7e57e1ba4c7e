//! Logging initialization with structured warning suppression.
//!
//! Known-benign warnings from third-party dependencies are silenced by a
//! single deny-list keyed by event target codes, installed once as a
//! subscriber filter. A second initialization is an error.

use tracing::{Level, Metadata};
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::error::{ConsoleError, ConsoleResult};

/// Deny-list of warning codes. A code matches an event whose target is the
/// code itself or lives underneath it (e.g. `chartkit::deprecated` matches
/// `chartkit::deprecated::axis`). Only WARN-level events are affected.
#[derive(Debug, Clone, Default)]
pub struct SuppressionList {
    codes: Vec<String>,
}

impl SuppressionList {
    pub fn new(codes: Vec<String>) -> Self {
        Self { codes }
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Whether an event with the given target and level is silenced.
    pub fn suppresses(&self, target: &str, level: Level) -> bool {
        if level != Level::WARN {
            return false;
        }
        self.codes.iter().any(|code| {
            target == code.as_str()
                || (target.len() > code.len()
                    && target.starts_with(code.as_str())
                    && target[code.len()..].starts_with("::"))
        })
    }

    fn suppresses_event(&self, metadata: &Metadata<'_>) -> bool {
        self.suppresses(metadata.target(), *metadata.level())
    }
}

/// Install the global subscriber: env-filter directives plus the warning
/// deny-list, formatted output (plain or JSON). Returns an error when a
/// subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> ConsoleResult<()> {
    let suppressions = SuppressionList::new(config.suppressed_warnings.clone());
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.directive));
    let suppress = filter_fn(move |metadata| !suppressions.suppresses_event(metadata));

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = if config.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_filter(suppress))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_filter(suppress))
            .try_init()
    };
    result.map_err(|e| ConsoleError::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suppresses_listed_code() {
        let list = SuppressionList::new(vec!["chartkit::deprecated".into()]);
        assert!(list.suppresses("chartkit::deprecated", Level::WARN));
        assert!(list.suppresses("chartkit::deprecated::axis", Level::WARN));
    }

    #[test]
    fn test_ignores_other_targets_and_levels() {
        let list = SuppressionList::new(vec!["chartkit::deprecated".into()]);
        // Unlisted target.
        assert!(!list.suppresses("promopilot_console::store", Level::WARN));
        // Prefix without a path separator is not a match.
        assert!(!list.suppresses("chartkit::deprecatedish", Level::WARN));
        // Errors from the same target always pass through.
        assert!(!list.suppresses("chartkit::deprecated", Level::ERROR));
    }

    #[test]
    fn test_empty_list_suppresses_nothing() {
        let list = SuppressionList::default();
        assert!(list.is_empty());
        assert!(!list.suppresses("chartkit::deprecated", Level::WARN));
    }
}
