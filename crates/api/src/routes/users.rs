//! Route definitions for users.

use axum::Router;

use crate::handlers::users::Users;
use crate::state::AppState;

/// Routes mounted at `/users`.
pub fn router() -> Router<AppState> {
    super::crud_router::<Users>()
}
