//! Generic CRUD handlers shared by every entity resource.
//!
//! Each handler decodes and validates its input, performs exactly one
//! repository call, and maps the outcome onto the response envelope or the
//! error taxonomy in [`AppError`]. Successful writes also publish an entity
//! event on the resource's topic.

use axum::extract::State;
use axum::http::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use validator::Validate;
use workshop_core::error::CoreError;
use workshop_core::types::DbId;
use workshop_db::SharedRepository;

use crate::error::{AppError, AppResult};
use crate::extract::{EntityId, Payload, QueryParams, ResponseFormat};
use crate::query::PaginationParams;
use crate::response::Negotiated;
use crate::state::AppState;

/// Binds an entity type to its DTOs, repository and event topic.
pub trait Resource: Send + Sync + 'static {
    type Entity: Serialize + Send + Sync + 'static;
    type Create: DeserializeOwned + Validate + Send + Sync + 'static;
    type Update: DeserializeOwned + Validate + Send + Sync + 'static;

    /// Display name used in error messages and events (e.g. `"User"`).
    const NAME: &'static str;

    /// Topic that receives this resource's entity events.
    const TOPIC: &'static str;

    fn repo(state: &AppState) -> &SharedRepository<Self::Entity, Self::Create, Self::Update>;

    fn id(entity: &Self::Entity) -> DbId;
}

/// Kind of write reported on the resource's topic.
#[derive(Debug, Clone, Copy)]
enum Change {
    Created,
    Updated,
    Deleted,
}

impl Change {
    fn as_str(self) -> &'static str {
        match self {
            Change::Created => "created",
            Change::Updated => "updated",
            Change::Deleted => "deleted",
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /{resource}?limit=&offset=
pub async fn list<R: Resource>(
    State(state): State<AppState>,
    format: ResponseFormat,
    QueryParams(params): QueryParams<PaginationParams>,
) -> AppResult<Negotiated<Vec<R::Entity>>> {
    let items = R::repo(&state).list(params.into()).await?;
    Ok(format.ok(items))
}

/// GET /{resource}/{id}
pub async fn get<R: Resource>(
    State(state): State<AppState>,
    format: ResponseFormat,
    EntityId(id): EntityId,
) -> AppResult<Negotiated<R::Entity>> {
    let entity = R::repo(&state)
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found::<R>(id))?;
    Ok(format.ok(entity))
}

/// POST /{resource}
pub async fn create<R: Resource>(
    State(state): State<AppState>,
    format: ResponseFormat,
    Payload(input): Payload<R::Create>,
) -> AppResult<Negotiated<R::Entity>> {
    let entity = R::repo(&state).create(&input).await?;
    let id = R::id(&entity);
    tracing::info!(entity = R::NAME, id, "Entity created");
    publish_change::<R>(&state, Change::Created, id);
    Ok(format.with_status(StatusCode::CREATED, entity))
}

/// PUT /{resource}/{id}
///
/// Only the fields present in the body are changed.
pub async fn update<R: Resource>(
    State(state): State<AppState>,
    format: ResponseFormat,
    EntityId(id): EntityId,
    Payload(input): Payload<R::Update>,
) -> AppResult<Negotiated<R::Entity>> {
    let entity = R::repo(&state)
        .update(id, &input)
        .await?
        .ok_or_else(|| not_found::<R>(id))?;
    publish_change::<R>(&state, Change::Updated, id);
    Ok(format.ok(entity))
}

/// DELETE /{resource}/{id}
pub async fn delete<R: Resource>(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<StatusCode> {
    if !R::repo(&state).delete(id).await? {
        return Err(not_found::<R>(id));
    }
    tracing::info!(entity = R::NAME, id, "Entity deleted");
    publish_change::<R>(&state, Change::Deleted, id);
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn not_found<R: Resource>(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: R::NAME,
        id,
    })
}

/// Fire-and-forget: a missing topic is logged, never surfaced to the caller.
fn publish_change<R: Resource>(state: &AppState, change: Change, id: DbId) {
    let payload = json!({
        "action": change.as_str(),
        "entity": R::NAME,
        "id": id,
    });
    if let Err(e) = state.topics.publish(R::TOPIC, Some(id.to_string()), payload) {
        tracing::warn!(error = %e, entity = R::NAME, id, "Entity event not published");
    }
}
