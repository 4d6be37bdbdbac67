//! Helpers shared by the handler tests.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use serde::de::DeserializeOwned;
use tower::ServiceExt;

use crate::auth::Authenticator;
use crate::config::Config;
use crate::router::create_router;
use crate::state::AppState;
use crate::store::MemoryStore;

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).unwrap()
    }
}

pub fn test_state(auth_enabled: bool, api_key: &str) -> AppState {
    let config = Config {
        auth_enabled,
        api_key: api_key.to_string(),
        ..Config::default()
    };

    AppState::new(
        Arc::new(MemoryStore::new()),
        Authenticator::new(auth_enabled, api_key),
        config,
    )
}

pub fn test_app(auth_enabled: bool, api_key: &str) -> Router {
    create_router(test_state(auth_enabled, api_key))
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    headers: &[(&str, &str)],
    body: Option<&str>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let body = match body {
        Some(b) => Body::from(b.to_string()),
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();

    TestResponse {
        status,
        headers,
        body,
    }
}
