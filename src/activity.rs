// 📜 Activity Log - what happened this session
//
// Append-only, in memory only. One event per successful add or split.

use crate::entities::FriendId;
use crate::split::Payer;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActivityKind {
    FriendAdded,
    BillSplit {
        bill: f64,
        paid_by_user: f64,
        payer: Payer,
        delta: f64,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub event_id: String,
    pub timestamp: DateTime<Utc>,
    pub friend_id: FriendId,
    pub friend_name: String,
    pub kind: ActivityKind,
}

impl ActivityEvent {
    pub fn new(friend_id: &FriendId, friend_name: &str, kind: ActivityKind) -> Self {
        Self {
            event_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            friend_id: friend_id.clone(),
            friend_name: friend_name.to_string(),
            kind,
        }
    }

    /// One-line description for the activity panel
    pub fn summary(&self) -> String {
        match &self.kind {
            ActivityKind::FriendAdded => format!("Added {}", self.friend_name),
            ActivityKind::BillSplit { bill, payer, delta, .. } => {
                let who = payer.label(&self.friend_name);
                format!(
                    "Split ${} with {} ({} paid, {:+})",
                    bill, self.friend_name, who, delta
                )
            }
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct ActivityLog {
    events: Vec<ActivityEvent>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn record(&mut self, event: ActivityEvent) {
        tracing::info!(
            event_id = %event.event_id,
            friend = %event.friend_id,
            summary = %event.summary(),
            "activity"
        );
        self.events.push(event);
    }

    /// Newest first, at most `limit`
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &ActivityEvent> {
        self.events.iter().rev().take(limit)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
