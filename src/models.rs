use serde::{Deserialize, Serialize};

/// Uniform response envelope used by the key-value endpoints and every error.
///
/// `value` is only set on a successful read, `error` only on failure.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            value: None,
            error: None,
        }
    }

    pub fn with_value(value: String) -> Self {
        Self {
            success: true,
            value: Some(value),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            value: None,
            error: Some(message.into()),
        }
    }
}

/// Request body for PUT/POST /kv/{key}
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct SetRequest {
    #[serde(default)]
    pub value: String,
}

/// Response type for GET /keys
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct KeysResponse {
    pub keys: Vec<String>,
}

/// Response type for GET /
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ServiceInfo {
    pub service: String,
    pub version: String,
    pub status: String,
    pub authentication: bool,
}

/// Response type for health check endpoint
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
}
