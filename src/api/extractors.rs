use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Path, Request},
    http::{header::CONTENT_TYPE, request::Parts, HeaderMap},
    Json,
};
use serde::de::DeserializeOwned;

use crate::api::errors::ApiError;

/// User id taken from the `:id` path segment
///
/// Usage:
/// ```rust,ignore
/// async fn handler(UserIdParam(id): UserIdParam) -> String {
///     format!("user {}", id)
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserIdParam(pub u64);

#[async_trait]
impl<S> FromRequestParts<S> for UserIdParam
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::invalid_input("Invalid user ID"))?;

        parse_user_id(&raw).map(UserIdParam)
    }
}

/// Parses an unsigned decimal id; signs, whitespace and overflow are rejected
pub fn parse_user_id(raw: &str) -> Result<u64, ApiError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        tracing::warn!(id = raw, "Rejected non-numeric user id");
        return Err(ApiError::invalid_input("Invalid user ID"));
    }

    raw.parse().map_err(|_| {
        tracing::warn!(id = raw, "Rejected out-of-range user id");
        ApiError::invalid_input("Invalid user ID")
    })
}

/// JSON body whose rejections surface as `ApiError::InvalidInput`
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            tracing::warn!(error = %e.body_text(), "Rejected request body");
            ApiError::invalid_input("Invalid request body")
        })?;

        Ok(JsonBody(value))
    }
}

/// Decodes a raw JSON body
///
/// An empty body or a literal `null` decodes as the type's default. Any
/// other body must be declared as JSON through `Content-Type`.
pub fn parse_json_body<T>(headers: &HeaderMap, bytes: &[u8]) -> Result<T, ApiError>
where
    T: DeserializeOwned + Default,
{
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    if !has_json_content_type(headers) {
        tracing::warn!("Rejected request body without JSON content type");
        return Err(ApiError::invalid_input("Invalid request body"));
    }

    serde_json::from_slice::<Option<T>>(bytes)
        .map(Option::unwrap_or_default)
        .map_err(|e| {
            tracing::warn!(error = %e, "Rejected request body");
            ApiError::invalid_input("Invalid request body")
        })
}

/// True for `application/json` and `application/*+json`, parameters ignored
fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };

    let essence = value.split(';').next().unwrap_or_default().trim();
    let Some((kind, subtype)) = essence.split_once('/') else {
        return false;
    };

    kind.eq_ignore_ascii_case("application")
        && (subtype.eq_ignore_ascii_case("json")
            || subtype.to_ascii_lowercase().ends_with("+json"))
}
