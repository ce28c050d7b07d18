pub mod health;
pub mod movies;
pub mod topics;
pub mod users;

use axum::routing::get;
use axum::Router;

use crate::handlers::crud::{self, Resource};
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users                         list, create
/// /users/{id}                    get, update, delete
///
/// /movies                        list, create
/// /movies/{id}                   get, update, delete
///
/// /topics                        list topics with counters
/// /topics/{topic}/messages       publish (POST, 202)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/movies", movies::router())
        .nest("/topics", topics::router())
}

/// Standard CRUD routes for a [`Resource`].
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create
/// GET    /{id}   -> get
/// PUT    /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn crud_router<R: Resource>() -> Router<AppState> {
    Router::new()
        .route("/", get(crud::list::<R>).post(crud::create::<R>))
        .route(
            "/{id}",
            get(crud::get::<R>)
                .put(crud::update::<R>)
                .delete(crud::delete::<R>),
        )
}
