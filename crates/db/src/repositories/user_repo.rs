//! Repository for the `users` table.

use async_trait::async_trait;
use sqlx::PgPool;
use workshop_core::types::DbId;

use crate::error::StoreError;
use crate::models::user::{CreateUser, UpdateUser, User};
use crate::repository::{Page, Repository};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, age, created_at, updated_at";

/// Provides CRUD operations for users.
#[derive(Clone)]
pub struct PgUserRepo {
    pool: PgPool,
}

impl PgUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PgUserRepo {
    type Entity = User;
    type Create = CreateUser;
    type Update = UpdateUser;

    async fn list(&self, page: Page) -> Result<Vec<User>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY id LIMIT $1 OFFSET $2");
        let rows = sqlx::query_as::<_, User>(&query)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<User>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, input: &CreateUser) -> Result<User, StoreError> {
        let query = format!(
            "INSERT INTO users (name, age) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(input.age)
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::from_write)
    }

    async fn update(&self, id: DbId, input: &UpdateUser) -> Result<Option<User>, StoreError> {
        let query = format!(
            "UPDATE users SET \
                name = COALESCE($2, name), \
                age = COALESCE($3, age), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.age)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::from_write)
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
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
