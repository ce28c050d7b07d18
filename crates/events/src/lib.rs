//! Named-topic publish/subscribe for fire-and-forget messaging.
//!
//! - [`TopicBus`]: a fixed set of named topics, each backed by a
//!   `tokio::sync::broadcast` channel.
//! - [`TopicMessage`]: the message envelope delivered to subscribers.
//! - [`TopicStats`]: per-topic published/delivered counters.
//! - [`TopicConsumer`]: background task that drains one subscription.

pub mod bus;
pub mod consumer;
pub mod stats;

pub use bus::{EventError, Subscription, TopicBus, TopicMessage};
pub use consumer::TopicConsumer;
pub use stats::{TopicCounters, TopicStats};
