//! HTTP error responses
//!
//! Every failure is returned as `{"error": "<message>"}`. Client errors map to
//! `400 Bad Request`, everything else to `500 Internal Server Error`.

use crate::error::ParkingError;
use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::fmt;

/// Error returned by HTTP handlers
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    #[must_use]
    pub const fn new(status: StatusCode, message: String) -> Self {
        Self { status, message }
    }

    /// Create a 400 Bad Request error
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message.into())
    }

    /// Create a 500 Internal Server Error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message.into())
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status.as_u16(), self.message)
    }
}

impl std::error::Error for ApiError {}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, message = %self.message, "Request failed");
        }
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}

impl From<ParkingError> for ApiError {
    fn from(err: ParkingError) -> Self {
        if err.is_client_error() {
            Self::bad_request(err.user_message())
        } else {
            Self::internal(err.user_message())
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_are_bad_requests() {
        let err = ApiError::from(ParkingError::DuplicatePlate);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "[400] Plate already exists");

        let err = ApiError::from(ParkingError::invalid_input("plate"));
        assert_eq!(err.to_string(), "[400] Missing plate parameter");
    }

    #[test]
    fn test_store_errors_are_server_errors() {
        let err = ApiError::from(ParkingError::StoreUnavailable("table missing".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "[500] table missing");
    }
}
