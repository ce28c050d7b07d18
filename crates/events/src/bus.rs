//! In-process topic bus.
//!
//! [`TopicBus`] owns one broadcast channel per declared topic. Publishing
//! never waits for consumers: with no subscribers the message is counted
//! and dropped. Share it via `Arc<TopicBus>`.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::stats::{TopicCounters, TopicStats};

/// Default buffer capacity for each topic's broadcast channel.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Longest accepted topic name.
const MAX_TOPIC_NAME_LEN: usize = 249;

#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("Unknown topic '{0}'")]
    UnknownTopic(String),

    #[error("Invalid topic name '{0}': use 1-249 characters from [A-Za-z0-9._-]")]
    InvalidTopicName(String),
}

// ---------------------------------------------------------------------------
// TopicMessage
// ---------------------------------------------------------------------------

/// A message published to a topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicMessage {
    /// Time-ordered unique id.
    pub id: Uuid,
    pub topic: String,
    /// Optional partitioning/correlation key, opaque to the bus.
    pub key: Option<String>,
    pub payload: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// TopicBus
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct Channel {
    sender: broadcast::Sender<TopicMessage>,
    counters: Arc<TopicCounters>,
}

/// A receiver for one topic plus the counters it reports into.
#[derive(Debug)]
pub struct Subscription {
    pub topic: String,
    pub receiver: broadcast::Receiver<TopicMessage>,
    pub counters: Arc<TopicCounters>,
}

/// Fan-out bus over a fixed set of named topics.
#[derive(Debug)]
pub struct TopicBus {
    channels: BTreeMap<String, Channel>,
}

impl TopicBus {
    /// Declare the given topics, each with a buffer of `capacity` messages.
    ///
    /// Duplicate names collapse into one topic. Slow receivers that fall more
    /// than `capacity` messages behind observe `RecvError::Lagged`.
    pub fn new<I, S>(names: I, capacity: usize) -> Result<Self, EventError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut channels = BTreeMap::new();
        for name in names {
            let name = name.into();
            validate_topic_name(&name)?;
            channels.entry(name).or_insert_with(|| {
                let (sender, _) = broadcast::channel(capacity);
                Channel {
                    sender,
                    counters: Arc::new(TopicCounters::default()),
                }
            });
        }
        Ok(Self { channels })
    }

    /// Publish `payload` to `topic` without waiting for any consumer.
    ///
    /// Returns the message as sent.
    pub fn publish(
        &self,
        topic: &str,
        key: Option<String>,
        payload: serde_json::Value,
    ) -> Result<TopicMessage, EventError> {
        let channel = self.channel(topic)?;
        let message = TopicMessage {
            id: Uuid::now_v7(),
            topic: topic.to_string(),
            key,
            payload,
            timestamp: Utc::now(),
        };

        channel.counters.record_published();
        // A SendError only means there are zero receivers.
        let _ = channel.sender.send(message.clone());
        Ok(message)
    }

    /// Subscribe to every message published on `topic` from now on.
    pub fn subscribe(&self, topic: &str) -> Result<Subscription, EventError> {
        let channel = self.channel(topic)?;
        Ok(Subscription {
            topic: topic.to_string(),
            receiver: channel.sender.subscribe(),
            counters: Arc::clone(&channel.counters),
        })
    }

    pub fn contains(&self, topic: &str) -> bool {
        self.channels.contains_key(topic)
    }

    /// Declared topic names, sorted.
    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.channels.keys().map(String::as_str)
    }

    /// Snapshot of every topic's counters, sorted by name.
    pub fn stats(&self) -> Vec<TopicStats> {
        self.channels
            .iter()
            .map(|(name, channel)| TopicStats {
                name: name.clone(),
                published: channel.counters.published(),
                delivered: channel.counters.delivered(),
            })
            .collect()
    }

    fn channel(&self, topic: &str) -> Result<&Channel, EventError> {
        self.channels
            .get(topic)
            .ok_or_else(|| EventError::UnknownTopic(topic.to_string()))
    }
}

/// Topic names follow broker conventions: 1-249 chars of `[A-Za-z0-9._-]`.
pub fn validate_topic_name(name: &str) -> Result<(), EventError> {
    let valid = !name.is_empty()
        && name.len() <= MAX_TOPIC_NAME_LEN
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
    if valid {
        Ok(())
    } else {
        Err(EventError::InvalidTopicName(name.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
