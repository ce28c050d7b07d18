/// Errors surfaced by a [`Repository`](crate::Repository) backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A write violated a unique constraint.
    #[error("Duplicate value violates unique constraint: {constraint}")]
    Conflict { constraint: String },

    /// Any other driver failure.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// PostgreSQL `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

impl StoreError {
    /// Classify a sqlx error from a write, lifting unique violations into
    /// [`StoreError::Conflict`].
    pub fn from_write(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
                return Self::Conflict {
                    constraint: db_err.constraint().unwrap_or("unknown").to_string(),
                };
            }
        }
        Self::Database(err)
    }
}
