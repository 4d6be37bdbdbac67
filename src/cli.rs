use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

/// Command-line flags. Any flag given overrides the config file and environment.
#[derive(Parser, Debug, Default)]
#[command(author, version, about = "In-memory key-value store over HTTP", long_about = None)]
pub struct Cli {
    /// Path to a TOML config file. Defaults to ./config.toml, then ~/.config/qkrn/config.toml.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the resolved configuration to ./config.toml and exit.
    #[arg(long)]
    pub export_config: bool,

    /// Node identifier reported in logs.
    #[arg(long)]
    pub node_id: Option<String>,

    /// Address to bind the HTTP listener to.
    #[arg(long)]
    pub address: Option<String>,

    /// Port to bind the HTTP listener to.
    #[arg(long)]
    pub port: Option<u16>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Require an API key on /keys and /kv routes.
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub auth_enabled: Option<bool>,

    /// API key for authentication. Generated at startup when auth is enabled and this is unset.
    #[arg(long)]
    pub api_key: Option<String>,
}

impl Cli {
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(node_id) = &self.node_id {
            config.node_id = node_id.clone();
        }
        if let Some(address) = &self.address {
            config.address = address.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(log_level) = &self.log_level {
            config.log_level = log_level.clone();
        }
        if let Some(auth_enabled) = self.auth_enabled {
            config.auth_enabled = auth_enabled;
        }
        if let Some(api_key) = &self.api_key {
            config.api_key = api_key.clone();
        }
    }
}
