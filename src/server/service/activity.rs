//! In-memory user activity log.
//!
//! Keeps the most recent user actions in a bounded ring buffer. When the buffer is full
//! the oldest entry is dropped. Nothing is persisted; the log starts empty on every boot.

use chrono::{DateTime, Utc};
use std::{collections::VecDeque, sync::Arc};
use tokio::sync::RwLock;

use crate::server::model::activity::{ActivityEntry, ActivityQuery};

/// Bounded activity buffer shared by every request handler.
///
/// Cloning shares the same buffer.
#[derive(Clone)]
pub struct ActivityLogger {
    entries: Arc<RwLock<VecDeque<ActivityEntry>>>,
    capacity: usize,
}

impl ActivityLogger {
    /// Creates an empty logger holding at most `capacity` entries (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);

        Self {
            entries: Arc::new(RwLock::new(VecDeque::with_capacity(capacity.min(1024)))),
            capacity,
        }
    }

    /// Records an action by `user_id`, dropping the oldest entry when full.
    pub async fn log(&self, user_id: i32, action: &str, details: serde_json::Value) {
        self.push(ActivityEntry {
            user_id,
            action: action.to_string(),
            details,
            timestamp: Utc::now(),
        })
        .await;
    }

    async fn push(&self, entry: ActivityEntry) {
        let mut entries = self.entries.write().await;

        while entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    #[cfg(test)]
    /// All entries by `user_id`, newest first.
    pub async fn by_user(&self, user_id: i32) -> Vec<ActivityEntry> {
        self.query(&ActivityQuery {
            user_id: Some(user_id),
            ..Default::default()
        })
        .await
    }

    #[cfg(test)]
    /// All entries with `action`, newest first.
    pub async fn by_action(&self, action: &str) -> Vec<ActivityEntry> {
        self.query(&ActivityQuery {
            action: Some(action.to_string()),
            ..Default::default()
        })
        .await
    }

    #[cfg(test)]
    /// All entries at or after `since`, newest first.
    pub async fn since(&self, since: DateTime<Utc>) -> Vec<ActivityEntry> {
        self.query(&ActivityQuery {
            since: Some(since),
            ..Default::default()
        })
        .await
    }

    /// Entries matching every filter of `query`, newest first, truncated to its limit.
    pub async fn query(&self, query: &ActivityQuery) -> Vec<ActivityEntry> {
        let entries = self.entries.read().await;

        entries
            .iter()
            .rev()
            .filter(|entry| query.matches(entry))
            .take(query.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }

    /// Removes entries older than `cutoff` and returns how many were removed.
    pub async fn prune_older_than(&self, cutoff: DateTime<Utc>) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();

        entries.retain(|entry| entry.timestamp >= cutoff);

        before - entries.len()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    #[cfg(test)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
