//! Aggregate dashboard numbers for the console landing page.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::actions::ActionStatus;
use crate::store::{ConsoleStore, ScenarioStatus};

/// Totals shown on the console dashboard, computed from store contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleOverview {
    pub total_scenarios: u64,
    pub active_scenarios: u64,
    pub total_actions: u64,
    pub active_actions: u64,
    pub total_triggered: u64,
    pub popups_shown: u64,
    pub emails_sent: u64,
    pub conversions: u64,
    pub conversion_rate: f64,
    pub daily: Vec<DailyTotals>,
}

/// One day of aggregated scenario activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyTotals {
    pub day: NaiveDate,
    pub triggered: u64,
    pub conversions: u64,
}

impl ConsoleStore {
    /// Fold every scenario's stats into the dashboard overview. Daily
    /// series are merged by calendar day, oldest first.
    pub fn overview(&self) -> ConsoleOverview {
        let total_scenarios = self.scenarios.len() as u64;
        let active_scenarios = self
            .scenarios
            .iter()
            .filter(|r| r.value().status == ScenarioStatus::Active)
            .count() as u64;
        let total_actions = self.actions.len() as u64;
        let active_actions = self
            .actions
            .iter()
            .filter(|r| r.value().status == ActionStatus::Active)
            .count() as u64;

        let mut total_triggered = 0u64;
        let mut popups_shown = 0u64;
        let mut emails_sent = 0u64;
        let mut conversions = 0u64;
        let mut by_day: BTreeMap<NaiveDate, (u64, u64)> = BTreeMap::new();

        for entry in self.scenarios.iter() {
            let stats = &entry.value().stats;
            total_triggered += stats.triggered;
            popups_shown += stats.popups_shown;
            emails_sent += stats.emails_sent;
            conversions += stats.conversions;
            for point in &stats.daily {
                let slot = by_day.entry(day_of(point.day)).or_insert((0, 0));
                slot.0 += point.triggered;
                slot.1 += point.conversions;
            }
        }

        let conversion_rate = if total_triggered > 0 {
            conversions as f64 / total_triggered as f64
        } else {
            0.0
        };

        ConsoleOverview {
            total_scenarios,
            active_scenarios,
            total_actions,
            active_actions,
            total_triggered,
            popups_shown,
            emails_sent,
            conversions,
            conversion_rate,
            daily: by_day
                .into_iter()
                .map(|(day, (triggered, conversions))| DailyTotals {
                    day,
                    triggered,
                    conversions,
                })
                .collect(),
        }
    }
}

fn day_of(ts: DateTime<Utc>) -> NaiveDate {
    ts.date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use promopilot_core::config::StorageConfig;

    #[test]
    fn test_empty_store_overview() {
        let store = ConsoleStore::new(&StorageConfig::default());
        let overview = store.overview();
        assert_eq!(overview.total_scenarios, 0);
        assert_eq!(overview.conversion_rate, 0.0);
        assert!(overview.daily.is_empty());
    }

    #[test]
    fn test_seeded_overview() {
        let store = ConsoleStore::new(&StorageConfig::default());
        store.seed_demo_data();
        let overview = store.overview();

        assert_eq!(overview.total_scenarios, 3);
        assert_eq!(overview.active_scenarios, 2);
        assert_eq!(overview.active_actions, 2);
        assert!(overview.total_triggered > 0);
        assert!(overview.conversion_rate > 0.0 && overview.conversion_rate < 1.0);
        // Merged daily series covers the seeded week, oldest first.
        assert_eq!(overview.daily.len(), 7);
        assert!(overview.daily.windows(2).all(|w| w[0].day < w[1].day));
    }
}
