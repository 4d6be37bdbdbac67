use crate::models::KeysResponse;
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// GET /keys handler - List every key currently in the store
///
/// The listing is a point-in-time snapshot in no particular order.
#[utoipa::path(
    get,
    path = routes::KEYS,
    responses(
        (status = 200, description = "Keys present in the store", body = KeysResponse),
        (status = 401, description = "Missing or invalid token", body = crate::models::ApiResponse),
        (status = 405, description = "Method not allowed", body = crate::models::ApiResponse)
    ),
    security((), ("bearer_auth" = []), ("api_key" = [])),
    tag = "kv"
)]
pub async fn list_handler(State(state): State<AppState>) -> (StatusCode, Json<KeysResponse>) {
    let keys = state.store.keys();

    tracing::info!("Listed {} keys", keys.len());
    (StatusCode::OK, Json(KeysResponse { keys }))
}
