mod api_doc;
mod auth;
mod cli;
mod config;
mod error;
mod handlers;
mod models;
mod router;
mod routes;
mod state;
mod store;
#[cfg(test)]
mod test_support;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use auth::Authenticator;
use cli::Cli;
use config::{Config, EXPORT_PATH};
use state::AppState;
use store::MemoryStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = Config::load(&cli)?;

    if cli.export_config {
        config.export_to_file(Path::new(EXPORT_PATH))?;
        println!("Configuration exported to {EXPORT_PATH}");
        return Ok(());
    }

    init_tracing(&config.log_level);

    tracing::info!("qkrn starting");
    config.log_startup();

    if config.auth_enabled && config.api_key.is_empty() {
        let generated = auth::generate_api_key();
        tracing::warn!("Generated API key: {}", generated);
        tracing::warn!("IMPORTANT: Save this API key - it will be required for all API requests");
        config.api_key = generated;
    }

    let store = Arc::new(MemoryStore::new());
    tracing::info!("Initialized memory store");

    let authenticator = Authenticator::new(config.auth_enabled, config.api_key.clone());
    if authenticator.is_enabled() {
        tracing::info!("Authentication enabled");
        if !authenticator.has_valid_key() {
            tracing::warn!("Authentication enabled but no valid API key configured");
        }
    } else {
        tracing::info!("Authentication disabled");
    }

    let addr = config.listen_addr();
    let state = AppState::new(store, authenticator, config);
    let app = router::create_router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Shutting down server...");
    Ok(())
}

/// `RUST_LOG` wins over the configured level when set
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
