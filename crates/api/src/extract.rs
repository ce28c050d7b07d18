//! Request extractors shared by every resource handler.
//!
//! They convert axum's plain-text rejections into [`AppError`] so that every
//! failure, including malformed input, produces the standard JSON error body.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::header::{ACCEPT, CONTENT_TYPE};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use serde::de::DeserializeOwned;
use validator::Validate;
use workshop_core::types::DbId;
use workshop_events::bus::validate_topic_name;
use workshop_core::validation::validate;

use crate::error::AppError;

pub const JSON_MIME: &str = "application/json";
pub const CBOR_MIME: &str = "application/cbor";

// ---------------------------------------------------------------------------
// Body
// ---------------------------------------------------------------------------

/// Wire format of a request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFormat {
    Json,
    Cbor,
}

impl BodyFormat {
    /// Pick the decoder from `Content-Type`. A missing header means JSON.
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, AppError> {
        let Some(value) = headers.get(CONTENT_TYPE) else {
            return Ok(Self::Json);
        };
        let raw = value
            .to_str()
            .map_err(|_| AppError::BadRequest("Content-Type header is not valid ASCII".into()))?;
        let mime = essence(raw);

        if mime == JSON_MIME || mime.ends_with("+json") {
            Ok(Self::Json)
        } else if mime == CBOR_MIME {
            Ok(Self::Cbor)
        } else {
            Err(AppError::UnsupportedMediaType(format!(
                "Expected {JSON_MIME} or {CBOR_MIME}, got '{raw}'"
            )))
        }
    }

    fn decode<T: DeserializeOwned>(self, bytes: &[u8]) -> Result<T, AppError> {
        match self {
            Self::Json => serde_json::from_slice(bytes)
                .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {e}"))),
            Self::Cbor => serde_cbor::from_slice(bytes)
                .map_err(|e| AppError::BadRequest(format!("Invalid CBOR body: {e}"))),
        }
    }
}

/// A decoded and validated request body.
///
/// Rejections:
/// - unsupported `Content-Type` -> 415
/// - undecodable body -> 400
/// - validation failure -> 422 with field details
#[derive(Debug)]
pub struct Payload<T>(pub T);

impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let format = BodyFormat::from_headers(req.headers())?;
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        let value: T = format.decode(&bytes)?;
        validate(&value)?;
        Ok(Self(value))
    }
}

// ---------------------------------------------------------------------------
// Response format
// ---------------------------------------------------------------------------

/// Encoding selected by the `Accept` header: CBOR if the client lists
/// `application/cbor`, otherwise JSON.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseFormat {
    #[default]
    Json,
    Cbor,
}

impl ResponseFormat {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let wants_cbor = headers
            .get_all(ACCEPT)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(','))
            .any(|item| essence(item) == CBOR_MIME);
        if wants_cbor {
            Self::Cbor
        } else {
            Self::Json
        }
    }
}

impl<S> FromRequestParts<S> for ResponseFormat
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

// ---------------------------------------------------------------------------
// Path / query
// ---------------------------------------------------------------------------

/// The `{id}` path segment of an entity route.
#[derive(Debug, Clone, Copy)]
pub struct EntityId(pub DbId);

impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<DbId>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        Ok(Self(id))
    }
}

/// The `{topic}` path segment, checked against the topic naming rules.
///
/// An undecodable segment is a 400 `BAD_REQUEST`; a malformed name is a 400
/// `VALIDATION_ERROR`. Whether the topic exists is left to the bus.
#[derive(Debug, Clone)]
pub struct TopicName(pub String);

impl<S> FromRequestParts<S> for TopicName
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(name) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        validate_topic_name(&name)?;
        Ok(Self(name))
    }
}

/// Query string parameters with JSON error rejections.
#[derive(Debug)]
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        Ok(Self(value))
    }
}

/// Media type without parameters, lowercased (`Application/JSON; charset=utf-8`
/// becomes `application/json`).
fn essence(raw: &str) -> String {
    raw.split(';').next().unwrap_or_default().trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(name: axum::http::HeaderName, value: &'static str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(name, HeaderValue::from_static(value));
        map
    }

    #[test]
    fn content_type_selects_decoder() {
        assert_eq!(BodyFormat::from_headers(&HeaderMap::new()).unwrap(), BodyFormat::Json);
        assert_eq!(
            BodyFormat::from_headers(&headers(CONTENT_TYPE, "application/json; charset=utf-8"))
                .unwrap(),
            BodyFormat::Json
        );
        assert_eq!(
            BodyFormat::from_headers(&headers(CONTENT_TYPE, "application/problem+json")).unwrap(),
            BodyFormat::Json
        );
        assert_eq!(
            BodyFormat::from_headers(&headers(CONTENT_TYPE, "Application/CBOR")).unwrap(),
            BodyFormat::Cbor
        );
        assert!(matches!(
            BodyFormat::from_headers(&headers(CONTENT_TYPE, "text/plain")),
            Err(AppError::UnsupportedMediaType(_))
        ));
    }

    #[test]
    fn accept_selects_encoder() {
        assert_eq!(ResponseFormat::from_headers(&HeaderMap::new()), ResponseFormat::Json);
        assert_eq!(
            ResponseFormat::from_headers(&headers(ACCEPT, "text/html, application/cbor;q=0.9")),
            ResponseFormat::Cbor
        );
        assert_eq!(
            ResponseFormat::from_headers(&headers(ACCEPT, "*/*")),
            ResponseFormat::Json
        );
    }

    #[test]
    fn cbor_decode_reports_bad_request() {
        let err = BodyFormat::Cbor
            .decode::<serde_json::Value>(&[0xff, 0x00])
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg.starts_with("Invalid CBOR body")));
    }
}
