//! Handlers for the `/topics` resource: fire-and-forget publishing and
//! per-topic delivery counters.

use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;
use workshop_core::types::Timestamp;
use workshop_events::TopicStats;

use crate::error::AppResult;
use crate::extract::{Payload, ResponseFormat, TopicName};
use crate::response::Negotiated;
use crate::state::AppState;

/// Body of `POST /topics/{topic}/messages`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PublishMessage {
    #[validate(length(min = 1, max = 256, message = "must be 1 to 256 characters"))]
    pub key: Option<String>,
    pub payload: serde_json::Value,
}

/// Acknowledgement returned once a message is handed to the bus.
#[derive(Debug, Serialize)]
pub struct PublishReceipt {
    pub id: Uuid,
    pub topic: String,
    pub timestamp: Timestamp,
}

/// GET /api/v1/topics
///
/// List declared topics with their published/delivered counters.
pub async fn list(
    State(state): State<AppState>,
    format: ResponseFormat,
) -> Negotiated<Vec<TopicStats>> {
    format.ok(state.topics.stats())
}

/// POST /api/v1/topics/{topic}/messages
///
/// Publish a message. Responds `202 Accepted` without waiting for any
/// consumer.
pub async fn publish(
    State(state): State<AppState>,
    format: ResponseFormat,
    TopicName(topic): TopicName,
    Payload(input): Payload<PublishMessage>,
) -> AppResult<Negotiated<PublishReceipt>> {
    let message = state.topics.publish(&topic, input.key, input.payload)?;
    tracing::debug!(%topic, id = %message.id, "Message published");

    Ok(format.with_status(
        StatusCode::ACCEPTED,
        PublishReceipt {
            id: message.id,
            topic: message.topic,
            timestamp: message.timestamp,
        },
    ))
}
