use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use workshop_core::types::DbId;

use super::Table;
use crate::error::StoreError;
use crate::models::movie::{CreateMovie, Movie, UpdateMovie};
use crate::repository::{Page, Repository};

const NAME_CONSTRAINT: &str = "uq_movies_name";

#[derive(Debug, Default)]
pub struct MemoryMovieRepo {
    table: RwLock<Table<Movie>>,
}

impl MemoryMovieRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

fn name_taken(table: &Table<Movie>, name: &str, except: Option<DbId>) -> bool {
    table
        .rows
        .values()
        .any(|m| m.name == name && Some(m.id) != except)
}

#[async_trait]
impl Repository for MemoryMovieRepo {
    type Entity = Movie;
    type Create = CreateMovie;
    type Update = UpdateMovie;

    async fn list(&self, page: Page) -> Result<Vec<Movie>, StoreError> {
        Ok(self.table.read().await.page(page))
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Movie>, StoreError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn create(&self, input: &CreateMovie) -> Result<Movie, StoreError> {
        let mut table = self.table.write().await;
        if name_taken(&table, &input.name, None) {
            return Err(StoreError::Conflict {
                constraint: NAME_CONSTRAINT.to_string(),
            });
        }

        let now = Utc::now();
        let movie = Movie {
            id: table.allocate_id(),
            name: input.name.clone(),
            producer: input.producer.clone(),
            release_date: input.release_date,
            actors: input.actors.clone(),
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(movie.id, movie.clone());
        Ok(movie)
    }

    async fn update(&self, id: DbId, input: &UpdateMovie) -> Result<Option<Movie>, StoreError> {
        let mut table = self.table.write().await;
        if let Some(name) = &input.name {
            if table.rows.contains_key(&id) && name_taken(&table, name, Some(id)) {
                return Err(StoreError::Conflict {
                    constraint: NAME_CONSTRAINT.to_string(),
                });
            }
        }

        let Some(movie) = table.rows.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = &input.name {
            movie.name = name.clone();
        }
        if let Some(producer) = &input.producer {
            movie.producer = producer.clone();
        }
        if let Some(date) = input.release_date {
            movie.release_date = date;
        }
        if let Some(actors) = &input.actors {
            movie.actors = actors.clone();
        }
        movie.updated_at = Utc::now();
        Ok(Some(movie.clone()))
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }
}
