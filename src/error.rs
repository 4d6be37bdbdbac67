use axum::{
    extract::rejection::PathRejection,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::auth::AuthError;
use crate::models::ApiResponse;
use crate::store::StoreError;

/// Custom error type for API endpoints
///
/// Every variant renders as the `{success: false, error}` envelope with the
/// matching HTTP status. Authentication failures additionally advertise the
/// bearer scheme through `WWW-Authenticate`.
#[derive(Debug)]
pub enum ApiError {
    /// Store operation received an empty key
    EmptyKey,
    /// Key not present on read or delete
    KeyNotFound,
    /// No key segment under /kv
    KeyRequired,
    /// Key segment could not be decoded (e.g. not valid UTF-8)
    InvalidKey(String),
    /// Request body was not a valid `{"value": string}` document
    InvalidJson,
    /// Verb not supported for a recognized path
    MethodNotAllowed,
    /// No route matched the path
    NotFound,
    /// Authenticator denied the request
    Unauthorized(AuthError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::EmptyKey
            | ApiError::KeyRequired
            | ApiError::InvalidKey(_)
            | ApiError::InvalidJson => StatusCode::BAD_REQUEST,
            ApiError::KeyNotFound | ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::EmptyKey => StoreError::EmptyKey.to_string(),
            ApiError::KeyNotFound => "Key not found".to_string(),
            ApiError::KeyRequired => "Key is required".to_string(),
            ApiError::InvalidKey(detail) => format!("Invalid key: {}", detail),
            ApiError::InvalidJson => "Invalid JSON".to_string(),
            ApiError::MethodNotAllowed => "Method not allowed".to_string(),
            ApiError::NotFound => "Not found".to_string(),
            ApiError::Unauthorized(err) => err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ApiResponse::error(self.message()));

        match self {
            ApiError::Unauthorized(_) => {
                (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response()
            }
            _ => (status, body).into_response(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::EmptyKey => ApiError::EmptyKey,
            StoreError::KeyNotFound => ApiError::KeyNotFound,
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::InvalidKey(rejection.body_text())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Unauthorized(err)
    }
}
