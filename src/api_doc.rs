use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::auth::API_KEY_HEADER;
use crate::handlers;
use crate::models::{ApiResponse, HealthResponse, KeysResponse, ServiceInfo, SetRequest};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "qkrn API",
        version = "0.1.0",
        description = "A single-node in-memory key-value store with optional API key authentication"
    ),
    paths(
        handlers::root::root_handler,
        handlers::health::health_handler,
        handlers::list::list_handler,
        handlers::get::get_handler,
        handlers::put::put_handler,
        handlers::delete::delete_handler
    ),
    components(
        schemas(
            ApiResponse,
            SetRequest,
            KeysResponse,
            ServiceInfo,
            HealthResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "service", description = "Service information"),
        (name = "health", description = "Health check operations"),
        (name = "kv", description = "Key-value store operations")
    )
)]
pub struct ApiDoc;

/// Registers the bearer and `X-API-Key` schemes referenced by the kv paths
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
        );
        components.add_security_scheme(
            "api_key",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(API_KEY_HEADER))),
        );
    }
}
