use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// API error type mapped once to an HTTP status and message
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Malformed body or unparsable identifier
    #[error("{0}")]
    InvalidInput(String),

    /// No matching row
    #[error("{0}")]
    NotFound(String),

    /// Any storage failure; the cause is logged, not returned
    #[error("{0}")]
    Persistence(String),
}

impl ApiError {
    /// Creates a 400 Bad Request error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Creates a 404 Not Found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Creates a 500 Internal Server Error
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}
