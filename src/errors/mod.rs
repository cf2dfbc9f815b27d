use std::io;

use axum::{http::StatusCode, response::{IntoResponse, Response}};
use thiserror::Error;

/// Body of every 500 response. Never carries error detail.
pub const INTERNAL_SERVER_ERROR_TEXT: &str = "500 internal server error";

/// Custom error types for the wiki application
#[derive(Debug, Error)]
pub enum WikiError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid page path: {0}")]
    InvalidPath(String),
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error("malformed form submission: {0}")]
    Form(String),
}

impl IntoResponse for WikiError {
    fn into_response(self) -> Response {
        log::error!("Request failed: {}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR_TEXT).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_response_hides_detail() {
        let err = WikiError::Io(io::Error::new(io::ErrorKind::PermissionDenied, "/secret/pages/Foo.md"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn display_includes_source() {
        let err = WikiError::Hash("salt too short".to_string());
        assert_eq!(err.to_string(), "password hashing failed: salt too short");
    }
}
