//! Route definitions for topics.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::topics;
use crate::state::AppState;

/// Routes mounted at `/topics`.
///
/// ```text
/// GET  /                   -> list
/// POST /{topic}/messages   -> publish
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(topics::list))
        .route("/{topic}/messages", post(topics::publish))
}
