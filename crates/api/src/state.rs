use std::sync::Arc;

use workshop_db::memory::{MemoryMovieRepo, MemoryUserRepo};
use workshop_db::models::movie::{CreateMovie, Movie, UpdateMovie};
use workshop_db::models::user::{CreateUser, UpdateUser, User};
use workshop_db::repositories::{PgMovieRepo, PgUserRepo};
use workshop_db::{DbPool, SharedRepository};
use workshop_events::TopicBus;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: every field is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub users: SharedRepository<User, CreateUser, UpdateUser>,
    pub movies: SharedRepository<Movie, CreateMovie, UpdateMovie>,
    /// Named topics for fire-and-forget messaging.
    pub topics: Arc<TopicBus>,
}

impl AppState {
    /// State backed by PostgreSQL repositories sharing `pool`.
    pub fn postgres(config: Arc<ServerConfig>, pool: DbPool, topics: Arc<TopicBus>) -> Self {
        Self {
            config,
            users: Arc::new(PgUserRepo::new(pool.clone())),
            movies: Arc::new(PgMovieRepo::new(pool)),
            topics,
        }
    }

    /// State backed by empty in-memory repositories.
    pub fn in_memory(config: Arc<ServerConfig>, topics: Arc<TopicBus>) -> Self {
        Self {
            config,
            users: Arc::new(MemoryUserRepo::new()),
            movies: Arc::new(MemoryMovieRepo::new()),
            topics,
        }
    }
}
