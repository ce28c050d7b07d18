use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Live counters for a single topic.
#[derive(Debug, Default)]
pub struct TopicCounters {
    published: AtomicU64,
    delivered: AtomicU64,
}

impl TopicCounters {
    pub fn record_published(&self) {
        self.published.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_delivered(&self) {
        self.delivered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn published(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }

    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }
}

/// Point-in-time snapshot of a topic's counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicStats {
    pub name: String,
    pub published: u64,
    /// Messages handed to consumers, summed over all subscriptions.
    pub delivered: u64,
}
