use crate::error::ApiError;
use crate::models::ApiResponse;
use crate::state::AppState;
use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};

/// DELETE /kv/{key} handler - Remove a key
#[utoipa::path(
    delete,
    path = "/kv/{key}",
    params(
        ("key" = String, Path, description = "Key to delete; may contain '/'")
    ),
    responses(
        (status = 200, description = "Key deleted", body = ApiResponse),
        (status = 400, description = "Empty or undecodable key", body = ApiResponse),
        (status = 401, description = "Missing or invalid token", body = ApiResponse),
        (status = 404, description = "Key not found", body = ApiResponse)
    ),
    security((), ("bearer_auth" = []), ("api_key" = [])),
    tag = "kv"
)]
pub async fn delete_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<(StatusCode, Json<ApiResponse>), ApiError> {
    let Path(key) = path?;

    state.store.delete(&key)?;

    tracing::info!("Successfully deleted key: {}", key);
    Ok((StatusCode::OK, Json(ApiResponse::ok())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::create_router;
    use crate::store::StoreError;
    use crate::test_support::{send, test_state};

    #[tokio::test]
    async fn test_delete_endpoint_success() {
        let state = test_state(false, "");
        state.store.set("foo", "bar").unwrap();
        let app = create_router(state.clone());

        let response = send(&app, "DELETE", "/kv/foo", &[], None).await;

        assert_eq!(response.status, StatusCode::OK);
        let body: ApiResponse = response.json();
        assert!(body.success);
        assert!(body.value.is_none());
        assert_eq!(state.store.get("foo"), Err(StoreError::KeyNotFound));
    }

    #[tokio::test]
    async fn test_delete_endpoint_not_found() {
        let state = test_state(false, "");
        let app = create_router(state);

        let response = send(&app, "DELETE", "/kv/foo", &[], None).await;

        assert_eq!(response.status, StatusCode::NOT_FOUND);
        let body: ApiResponse = response.json();
        assert_eq!(body.error.as_deref(), Some("Key not found"));
    }

    #[tokio::test]
    async fn test_delete_endpoint_undecodable_key() {
        let state = test_state(false, "");
        let app = create_router(state);

        let response = send(&app, "DELETE", "/kv/%C3%28", &[], None).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        let body: ApiResponse = response.json();
        assert!(body.error.unwrap().starts_with("Invalid key"));
    }
}
