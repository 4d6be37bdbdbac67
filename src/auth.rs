//! Optional shared-secret authentication.
//!
//! When enabled, every route behind [`require_auth`] needs a token matching the
//! configured API key. Tokens are read from, in order:
//! - `Authorization: Bearer <token>`
//! - `X-API-Key: <token>`
//! - `?api_key=<token>`
//!
//! `/` and `/health` are always reachable without a token.

use axum::{
    extract::{Query, Request, State},
    http::{header, HeaderMap, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};
use rand::Rng;
use subtle::ConstantTimeEq;

use crate::error::ApiError;
use crate::routes;
use crate::state::AppState;

/// Dedicated API key header
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Query parameter carrying the API key; the first occurrence wins
pub const API_KEY_QUERY_PARAM: &str = "api_key";

/// Paths reachable without credentials, whether or not auth is enabled
pub const EXEMPT_PATHS: [&str; 2] = [routes::ROOT, routes::HEALTH];

/// Number of random bytes in a generated API key (hex encoded to twice as many chars)
const GENERATED_KEY_BYTES: usize = 32;

/// Reasons a request is denied. Both surface as 401; only the message differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Missing authentication token")]
    MissingToken,
    #[error("Invalid authentication token")]
    InvalidToken,
}

/// Validates request credentials against a single shared secret.
///
/// Constructed once at startup from the resolved configuration and never
/// mutated afterwards.
#[derive(Clone)]
pub struct Authenticator {
    enabled: bool,
    api_key: String,
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("enabled", &self.enabled)
            .field("has_valid_key", &self.has_valid_key())
            .finish()
    }
}

impl Authenticator {
    pub fn new(enabled: bool, api_key: impl Into<String>) -> Self {
        Self {
            enabled,
            api_key: api_key.into(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// An empty key means no token can ever match
    pub fn has_valid_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    pub fn is_exempt(path: &str) -> bool {
        EXEMPT_PATHS.contains(&path)
    }

    /// Decide whether a request for `path` carrying `token` may proceed
    pub fn authorize(&self, path: &str, token: Option<&str>) -> Result<(), AuthError> {
        if !self.enabled || Self::is_exempt(path) {
            return Ok(());
        }

        let token = token.ok_or(AuthError::MissingToken)?;
        if self.validate_token(token) {
            Ok(())
        } else {
            Err(AuthError::InvalidToken)
        }
    }

    // Comparison time depends only on the lengths, never on where the bytes differ
    fn validate_token(&self, token: &str) -> bool {
        if self.api_key.is_empty() {
            return false;
        }

        token.as_bytes().ct_eq(self.api_key.as_bytes()).into()
    }
}

/// Pull the caller's token out of the request, first match wins.
///
/// A well-formed bearer header takes precedence even when its token is empty,
/// in which case the request is treated as carrying no token.
pub fn extract_token(headers: &HeaderMap, uri: &Uri) -> Option<String> {
    if let Some(auth_header) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    {
        if let Some((scheme, token)) = auth_header.split_once(' ') {
            if scheme.eq_ignore_ascii_case("bearer") {
                return (!token.is_empty()).then(|| token.to_string());
            }
        }
    }

    if let Some(api_key) = headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
    {
        return Some(api_key.to_string());
    }

    let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(uri).ok()?;
    pairs
        .into_iter()
        .find(|(name, _)| name == API_KEY_QUERY_PARAM)
        .map(|(_, value)| value)
        .filter(|key| !key.is_empty())
}

/// Generate a fresh random API key as 64 lowercase hex characters
pub fn generate_api_key() -> String {
    let mut bytes = [0u8; GENERATED_KEY_BYTES];
    rand::rng().fill(&mut bytes);
    hex::encode(bytes)
}

/// Middleware gating the key-value routes behind the [`Authenticator`]
pub async fn require_auth(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let token = extract_token(request.headers(), request.uri());

    match state
        .authenticator
        .authorize(request.uri().path(), token.as_deref())
    {
        Ok(()) => next.run(request).await,
        Err(err) => {
            tracing::warn!(
                path = %request.uri().path(),
                method = %request.method(),
                reason = %err,
                "authentication failed"
            );
            ApiError::from(err).into_response()
        }
    }
}
