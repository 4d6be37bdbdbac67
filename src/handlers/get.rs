use crate::error::ApiError;
use crate::models::ApiResponse;
use crate::state::AppState;
use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};

/// GET /kv/{key} handler - Read a value
#[utoipa::path(
    get,
    path = "/kv/{key}",
    params(
        ("key" = String, Path, description = "Key to read; may contain '/'")
    ),
    responses(
        (status = 200, description = "Value found", body = ApiResponse),
        (status = 400, description = "Empty or undecodable key", body = ApiResponse),
        (status = 401, description = "Missing or invalid token", body = ApiResponse),
        (status = 404, description = "Key not found", body = ApiResponse)
    ),
    security((), ("bearer_auth" = []), ("api_key" = [])),
    tag = "kv"
)]
pub async fn get_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<(StatusCode, Json<ApiResponse>), ApiError> {
    let Path(key) = path?;

    match state.store.get(&key) {
        Ok(value) => {
            tracing::info!("Successfully retrieved key: {}", key);
            Ok((StatusCode::OK, Json(ApiResponse::with_value(value))))
        }
        Err(err) => {
            tracing::info!("Read failed for key '{}': {}", key, err);
            Err(err.into())
        }
    }
}
