//! Repository for the `movies` table.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use workshop_core::types::{DbId, Timestamp};

use crate::error::StoreError;
use crate::models::movie::{Actor, CreateMovie, Movie, UpdateMovie};
use crate::repository::{Page, Repository};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, producer, release_date, actors, created_at, updated_at";

/// Raw row; `actors` is decoded from `JSONB`.
#[derive(FromRow)]
struct MovieRow {
    id: DbId,
    name: String,
    producer: String,
    release_date: NaiveDate,
    actors: Json<Vec<Actor>>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl From<MovieRow> for Movie {
    fn from(row: MovieRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            producer: row.producer,
            release_date: row.release_date,
            actors: row.actors.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Provides CRUD operations for movies.
#[derive(Clone)]
pub struct PgMovieRepo {
    pool: PgPool,
}

impl PgMovieRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PgMovieRepo {
    type Entity = Movie;
    type Create = CreateMovie;
    type Update = UpdateMovie;

    async fn list(&self, page: Page) -> Result<Vec<Movie>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM movies ORDER BY id LIMIT $1 OFFSET $2");
        let rows = sqlx::query_as::<_, MovieRow>(&query)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Movie::from).collect())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Movie>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE id = $1");
        let row = sqlx::query_as::<_, MovieRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Movie::from))
    }

    async fn create(&self, input: &CreateMovie) -> Result<Movie, StoreError> {
        let query = format!(
            "INSERT INTO movies (name, producer, release_date, actors) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MovieRow>(&query)
            .bind(&input.name)
            .bind(&input.producer)
            .bind(input.release_date)
            .bind(Json(&input.actors))
            .fetch_one(&self.pool)
            .await
            .map(Movie::from)
            .map_err(StoreError::from_write)
    }

    async fn update(&self, id: DbId, input: &UpdateMovie) -> Result<Option<Movie>, StoreError> {
        let query = format!(
            "UPDATE movies SET \
                name = COALESCE($2, name), \
                producer = COALESCE($3, producer), \
                release_date = COALESCE($4, release_date), \
                actors = COALESCE($5, actors), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MovieRow>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.producer)
            .bind(input.release_date)
            .bind(input.actors.as_ref().map(Json))
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(Movie::from))
            .map_err(StoreError::from_write)
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}
