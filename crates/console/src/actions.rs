//! Response actions — the popups and emails a scenario fires when its
//! trigger rule matches.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a response action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    Draft,
    Active,
    Paused,
    Archived,
}

/// What the action shows or sends.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum ActionContent {
    Popup {
        title: String,
        body: String,
        image_url: Option<String>,
        cta_text: String,
        cta_url: String,
        display_secs: u32,
    },
    Email {
        subject: String,
        preheader: Option<String>,
        body_template: String,
        sender: String,
    },
}

impl ActionContent {
    pub fn kind(&self) -> &'static str {
        match self {
            ActionContent::Popup { .. } => "popup",
            ActionContent::Email { .. } => "email",
        }
    }
}

/// A configured response action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseAction {
    pub id: Uuid,
    pub name: String,
    pub status: ActionStatus,
    pub content: ActionContent,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
