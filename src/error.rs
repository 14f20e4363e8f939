// HTTP API Error Types
use axum::{extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::auth::AuthError;
use crate::database::manager::DatabaseError;
use crate::services::contact_service::ContactError;
use crate::validation::{self, FieldError};

pub const SERVER_ERROR_MESSAGE: &str = "Server error";

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    ValidationError(Vec<FieldError>),

    // 401 Unauthorized
    Unauthorized(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::ValidationError(_) => "Validation failed",
            ApiError::Unauthorized(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::ValidationError(errors) => json!({ "errors": errors }),
            _ => json!({ "msg": self.message() }),
        }
    }
}

// Static constructor methods
impl ApiError {
    pub fn validation_error(errors: Vec<FieldError>) -> Self {
        ApiError::ValidationError(errors)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    /// Generic 500; the caller is expected to have logged the real cause
    pub fn internal_server_error() -> Self {
        ApiError::InternalServerError(SERVER_ERROR_MESSAGE.to_string())
    }
}

// Convert other error types to ApiError
impl From<ContactError> for ApiError {
    fn from(err: ContactError) -> Self {
        match err {
            ContactError::Validation(errors) => ApiError::validation_error(errors),
            ContactError::NotFound => ApiError::not_found(err.to_string()),
            ContactError::NotAuthorized => ApiError::unauthorized(err.to_string()),
            ContactError::Store(db_err) => db_err.into(),
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        // Log the real error but return generic message
        tracing::error!("Contact store error: {}", err);
        ApiError::internal_server_error()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken | AuthError::InvalidToken(_) => {
                ApiError::unauthorized(err.to_string())
            }
            AuthError::TokenGeneration(_) | AuthError::InvalidSecret => {
                tracing::error!("Token error: {}", err);
                ApiError::internal_server_error()
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation_error(vec![validation::body_error(rejection.body_text())])
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ownership_and_existence_map_to_distinct_statuses() {
        let not_found = ApiError::from(ContactError::NotFound);
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(not_found.to_json(), json!({ "msg": "Contact not found" }));

        let denied = ApiError::from(ContactError::NotAuthorized);
        assert_eq!(denied.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(denied.to_json(), json!({ "msg": "Not authorized" }));
    }

    #[test]
    fn store_errors_do_not_leak_detail() {
        let err = ApiError::from(ContactError::Store(DatabaseError::QueryError(
            "relation \"contacts\" does not exist".to_string(),
        )));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_json(), json!({ "msg": SERVER_ERROR_MESSAGE }));
    }

    #[test]
    fn validation_errors_are_itemized() {
        let err = ApiError::from(ContactError::Validation(vec![FieldError::body(
            "name",
            "Name is required",
            None,
        )]));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.to_json(),
            json!({ "errors": [{ "msg": "Name is required", "param": "name", "location": "body" }] })
        );
    }

    #[test]
    fn gate_errors_are_unauthorized() {
        let err = ApiError::from(AuthError::MissingToken);
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.to_json(), json!({ "msg": "No token, authorization denied" }));
    }
}
