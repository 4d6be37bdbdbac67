use axum::{
    middleware,
    routing::{any, get},
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::auth::require_auth;
use crate::handlers::{
    delete_handler, get_handler, health_handler, key_required, list_handler, method_not_allowed,
    not_found, put_handler, root_handler,
};
use crate::routes;
use crate::state::AppState;

/// Build the full application router.
///
/// `/` and `/health` are public. `/keys` and the `/kv` family sit behind
/// [`require_auth`], which also covers their 405 and "key is required"
/// responses so unauthenticated callers learn nothing about the route.
///
/// `/` answers any verb. The other families accept only their listed verbs;
/// HEAD is rejected explicitly since `get` would otherwise serve it.
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .route(
            routes::KEYS,
            get(list_handler)
                .head(method_not_allowed)
                .fallback(method_not_allowed),
        )
        .route(routes::KV_ROOT, any(key_required))
        .route(routes::KV_ROOT_SLASH, any(key_required))
        .route(
            routes::KV_ITEM,
            get(get_handler)
                .head(method_not_allowed)
                .put(put_handler)
                .post(put_handler)
                .delete(delete_handler)
                .fallback(method_not_allowed),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route(routes::ROOT, any(root_handler))
        .route(
            routes::HEALTH,
            get(health_handler)
                .head(method_not_allowed)
                .fallback(method_not_allowed),
        )
        .merge(protected)
        .merge(SwaggerUi::new(routes::SWAGGER_UI).url(routes::OPENAPI_JSON, ApiDoc::openapi()))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
