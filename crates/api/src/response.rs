//! Shared response envelope types for API handlers.
//!
//! All successful responses use a `{ "data": ... }` envelope, encoded as
//! JSON or CBOR depending on the request's `Accept` header.

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::error::AppError;
use crate::extract::{ResponseFormat, CBOR_MIME};

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// A status code plus `{ "data": T }` body in the negotiated format.
#[derive(Debug)]
pub struct Negotiated<T: Serialize> {
    pub format: ResponseFormat,
    pub status: StatusCode,
    pub body: DataResponse<T>,
}

impl ResponseFormat {
    /// Wrap `data` in the envelope with `200 OK`.
    pub fn ok<T: Serialize>(self, data: T) -> Negotiated<T> {
        self.with_status(StatusCode::OK, data)
    }

    pub fn with_status<T: Serialize>(self, status: StatusCode, data: T) -> Negotiated<T> {
        Negotiated {
            format: self,
            status,
            body: DataResponse { data },
        }
    }
}

impl<T: Serialize> IntoResponse for Negotiated<T> {
    fn into_response(self) -> Response {
        match self.format {
            ResponseFormat::Json => (self.status, Json(self.body)).into_response(),
            ResponseFormat::Cbor => match serde_cbor::to_vec(&self.body) {
                Ok(bytes) => (
                    self.status,
                    [(CONTENT_TYPE, HeaderValue::from_static(CBOR_MIME))],
                    bytes,
                )
                    .into_response(),
                Err(e) => AppError::InternalError(format!("CBOR encoding failed: {e}")).into_response(),
            },
        }
    }
}
