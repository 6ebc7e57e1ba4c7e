//! PromoPilot core — shared error type, configuration, and logging setup
//! for the marketing-automation admin console.

pub mod config;
pub mod error;
pub mod logging;

pub use config::AppConfig;
pub use error::{ConsoleError, ConsoleResult};
pub use logging::{init_logging, SuppressionList};
