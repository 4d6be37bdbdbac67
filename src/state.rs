use crate::auth::Authenticator;
use crate::config::Config;
use crate::store::KeyValueStore;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn KeyValueStore>,
    pub authenticator: Arc<Authenticator>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn KeyValueStore>, authenticator: Authenticator, config: Config) -> Self {
        Self {
            store,
            authenticator: Arc::new(authenticator),
            config: Arc::new(config),
        }
    }
}
