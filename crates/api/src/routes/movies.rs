//! Route definitions for movies.

use axum::Router;

use crate::handlers::movies::Movies;
use crate::state::AppState;

/// Routes mounted at `/movies`.
pub fn router() -> Router<AppState> {
    super::crud_router::<Movies>()
}
