use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use workshop_core::error::CoreError;
use workshop_core::validation::FieldError;
use workshop_db::StoreError;
use workshop_events::EventError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors, the storage and topic layers'
/// errors, and adds HTTP-specific variants. Implements [`IntoResponse`] to
/// produce consistent JSON error responses:
///
/// ```json
/// { "error": "...", "code": "VALIDATION_ERROR", "details": [ ... ] }
/// ```
///
/// `details` is present only for field-level validation failures.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `workshop_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A repository error.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A topic bus error.
    #[error(transparent)]
    Event(#[from] EventError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The request body's content type is not accepted.
    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Status, machine-readable code, message and optional field details.
type Classified = (StatusCode, &'static str, String, Option<Vec<FieldError>>);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::Core(core) => classify_core_error(core),
            AppError::Store(err) => classify_store_error(err),
            AppError::Event(err) => classify_event_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg, None),
            AppError::UnsupportedMediaType(msg) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_MEDIA_TYPE",
                msg,
                None,
            ),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = match details {
            Some(details) => json!({
                "error": message,
                "code": code,
                "details": details,
            }),
            None => json!({
                "error": message,
                "code": code,
            }),
        };

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> Classified {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
        None,
    )
}

fn classify_core_error(err: CoreError) -> Classified {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
            None,
        ),
        CoreError::NotFoundByName { entity, name } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} '{name}' not found"),
            None,
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg, None),
        CoreError::InvalidFields(fields) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "VALIDATION_ERROR",
            "Request validation failed".to_string(),
            Some(fields),
        ),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg, None),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal error");
            internal()
        }
    }
}

/// Classify a repository error by translating it into the core taxonomy.
///
/// - Unique constraint violations map to 409.
/// - `RowNotFound` maps to 404.
/// - Everything else maps to 500 with a sanitized message.
fn classify_store_error(err: StoreError) -> Classified {
    match err {
        StoreError::Conflict { constraint } => classify_core_error(CoreError::Conflict(format!(
            "Duplicate value violates unique constraint: {constraint}"
        ))),
        StoreError::Database(sqlx::Error::RowNotFound) => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
            None,
        ),
        StoreError::Database(other) => {
            classify_core_error(CoreError::Internal(format!("Database error: {other}")))
        }
    }
}

fn classify_event_error(err: EventError) -> Classified {
    let core = match err {
        EventError::UnknownTopic(name) => CoreError::NotFoundByName {
            entity: "Topic",
            name,
        },
        EventError::InvalidTopicName(_) => CoreError::Validation(err.to_string()),
    };
    classify_core_error(core)
}
