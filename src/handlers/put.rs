use crate::error::ApiError;
use crate::models::{ApiResponse, SetRequest};
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};

/// PUT /kv/{key} handler - Store a value
///
/// Also mounted for POST. The body must start with `{"value": "<string>"}`;
/// a missing `value` or a `null` body stores the empty string and anything
/// after the first JSON value is ignored. Content-Type is not checked.
#[utoipa::path(
    put,
    path = "/kv/{key}",
    params(
        ("key" = String, Path, description = "Key to write; may contain '/'")
    ),
    request_body = SetRequest,
    responses(
        (status = 201, description = "Value stored", body = ApiResponse),
        (status = 400, description = "Invalid JSON, empty or undecodable key", body = ApiResponse),
        (status = 401, description = "Missing or invalid token", body = ApiResponse)
    ),
    security((), ("bearer_auth" = []), ("api_key" = [])),
    tag = "kv"
)]
pub async fn put_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> Result<(StatusCode, Json<ApiResponse>), ApiError> {
    let Path(key) = path?;

    let request = parse_set_request(&body).map_err(|err| {
        tracing::debug!("Rejected body for key '{}': {}", key, err);
        ApiError::InvalidJson
    })?;

    state.store.set(&key, &request.value)?;

    tracing::info!("Successfully stored key: {}", key);
    tracing::debug!("Store now holds {} keys", state.store.size());
    Ok((StatusCode::CREATED, Json(ApiResponse::ok())))
}

/// Decode the first JSON value of the body
fn parse_set_request(body: &[u8]) -> Result<SetRequest, serde_json::Error> {
    let mut values =
        serde_json::Deserializer::from_slice(body).into_iter::<Option<SetRequest>>();
    match values.next() {
        Some(request) => Ok(request?.unwrap_or_default()),
        None => Err(serde::de::Error::custom("empty body")),
    }
}
