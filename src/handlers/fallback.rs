use crate::error::ApiError;

/// Any verb on a recognized path that does not support it
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// `/kv` and `/kv/` carry no key segment
pub async fn key_required() -> ApiError {
    ApiError::KeyRequired
}

/// No route matched
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

#[cfg(test)]
mod tests {
    use crate::models::ApiResponse;
    use crate::test_support::{send, test_app};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_kv_without_key() {
        let app = test_app(false, "");

        for (method, uri) in [("GET", "/kv/"), ("PUT", "/kv/"), ("DELETE", "/kv"), ("PATCH", "/kv/")] {
            let response = send(&app, method, uri, &[], None).await;

            assert_eq!(response.status, StatusCode::BAD_REQUEST, "{method} {uri}");
            let body: ApiResponse = response.json();
            assert_eq!(body.error.as_deref(), Some("Key is required"));
        }
    }

    #[tokio::test]
    async fn test_kv_without_key_checks_auth_first() {
        let app = test_app(true, "S");

        let response = send(&app, "GET", "/kv/", &[], None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);

        let response = send(&app, "GET", "/kv/", &[("authorization", "Bearer S")], None).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_kv_unsupported_method() {
        let app = test_app(false, "");

        for method in ["PATCH", "OPTIONS", "TRACE"] {
            let response = send(&app, method, "/kv/foo", &[], None).await;
            assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED, "{method}");
        }
    }

    #[tokio::test]
    async fn test_unknown_path() {
        let app = test_app(true, "S");
        let response = send(&app, "GET", "/nowhere", &[], None).await;

        assert_eq!(response.status, StatusCode::NOT_FOUND);
        let body: ApiResponse = response.json();
        assert_eq!(body.error.as_deref(), Some("Not found"));
    }
}
