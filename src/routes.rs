// Route path constants - single source of truth for all API paths

pub const ROOT: &str = "/";
pub const HEALTH: &str = "/health";
pub const KEYS: &str = "/keys";
pub const KV_ROOT: &str = "/kv";
pub const KV_ROOT_SLASH: &str = "/kv/";
pub const KV_ITEM: &str = "/kv/{*key}";

pub const SWAGGER_UI: &str = "/swagger-ui";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";
