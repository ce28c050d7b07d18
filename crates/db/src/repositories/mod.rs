//! PostgreSQL repositories.
//!
//! Each repository wraps a [`PgPool`](sqlx::PgPool) and implements
//! [`Repository`](crate::Repository) with runtime-checked queries.

pub mod movie_repo;
pub mod user_repo;

pub use movie_repo::PgMovieRepo;
pub use user_repo::PgUserRepo;
