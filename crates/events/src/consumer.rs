//! Background consumer for a single topic subscription.

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use crate::bus::Subscription;

/// Drains one [`Subscription`], logging each message and counting it as
/// delivered.
pub struct TopicConsumer;

impl TopicConsumer {
    /// Run the consume loop.
    ///
    /// Exits when `cancel` fires or when the [`TopicBus`](crate::TopicBus)
    /// is dropped. Lagging behind the channel buffer skips messages and logs
    /// how many were lost.
    pub async fn run(subscription: Subscription, cancel: CancellationToken) {
        let Subscription {
            topic,
            mut receiver,
            counters,
        } = subscription;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!(%topic, "Topic consumer cancelled");
                    break;
                }
                received = receiver.recv() => match received {
                    Ok(message) => {
                        counters.record_delivered();
                        tracing::info!(
                            %topic,
                            id = %message.id,
                            key = ?message.key,
                            "Consumed message"
                        );
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(%topic, skipped, "Topic consumer lagged, messages were dropped");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        tracing::info!(%topic, "Topic closed, consumer shutting down");
                        break;
                    }
                }
            }
        }
    }
}
