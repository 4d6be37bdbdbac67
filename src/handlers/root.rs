use crate::models::ServiceInfo;
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

pub const SERVICE_NAME: &str = "qkrn";

/// GET / handler - Service descriptor
///
/// Always reachable without credentials. Mounted for every verb.
#[utoipa::path(
    get,
    path = routes::ROOT,
    responses(
        (status = 200, description = "Service descriptor", body = ServiceInfo)
    ),
    tag = "service"
)]
pub async fn root_handler(State(state): State<AppState>) -> (StatusCode, Json<ServiceInfo>) {
    tracing::debug!(node_id = %state.config.node_id, "Serving service descriptor");
    (
        StatusCode::OK,
        Json(ServiceInfo {
            service: SERVICE_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            status: "running".to_string(),
            authentication: state.authenticator.is_enabled(),
        }),
    )
}
