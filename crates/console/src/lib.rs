//! Console domain — marketing scenarios, response actions, audit log, and
//! the dashboard overview, all backed by the in-memory store.

pub mod actions;
pub mod analytics;
pub mod store;

pub use actions::{ActionContent, ActionStatus, ResponseAction};
pub use analytics::{ConsoleOverview, DailyTotals};
pub use store::{
    AuditAction, AuditLogEntry, ConsoleStore, CreateActionRequest, CreateScenarioRequest,
    DailyDataPoint, MarketingScenario, ScenarioStats, ScenarioStatus, UpdateScenarioRequest,
};
