use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

/// File written by `--export-config`
pub const EXPORT_PATH: &str = "./config.toml";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Resolved service configuration.
///
/// Layered lowest to highest: defaults, TOML file, `QKRN_*` environment
/// variables, command-line flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub node_id: String,
    pub address: String,
    pub port: u16,
    pub log_level: String,
    pub auth_enabled: bool,
    pub api_key: String,
    /// File the configuration was read from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            node_id: env::var("HOSTNAME")
                .ok()
                .filter(|h| !h.is_empty())
                .unwrap_or_else(|| "localhost".to_string()),
            address: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            auth_enabled: false,
            api_key: String::new(),
            source: None,
        }
    }
}

impl Config {
    /// Resolve the full configuration for a run
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::discover()?,
        };

        config.apply_env()?;
        cli.apply_to(&mut config);
        config.validate()?;

        Ok(config)
    }

    /// Default config file locations, in search order
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(EXPORT_PATH)];
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("qkrn").join("config.toml"));
        }
        paths
    }

    /// First existing file from [`Config::search_paths`], or defaults when none exists
    pub fn discover() -> Result<Self> {
        Self::discover_in(&Self::search_paths())
    }

    fn discover_in(paths: &[PathBuf]) -> Result<Self> {
        match paths.iter().find(|p| p.exists()) {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!("config file does not exist: {}", path.display());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.source = Some(path.to_path_buf());

        Ok(config)
    }

    pub fn export_to_file(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory {}", dir.display()))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to encode config to TOML")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;

        Ok(())
    }

    /// Override fields from `QKRN_*` environment variables
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|name| env::var(name).ok())
    }

    fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(node_id) = lookup("QKRN_NODE_ID") {
            self.node_id = node_id;
        }

        if let Some(address) = lookup("QKRN_ADDRESS") {
            self.address = address;
        }

        if let Some(port) = lookup("QKRN_PORT") {
            self.port = port
                .parse::<u16>()
                .context("QKRN_PORT must be a valid port number (0-65535)")?;
        }

        if let Some(log_level) = lookup("QKRN_LOG_LEVEL") {
            self.log_level = log_level;
        }

        if let Some(auth_enabled) = lookup("QKRN_AUTH_ENABLED") {
            self.auth_enabled = auth_enabled
                .parse::<bool>()
                .context("QKRN_AUTH_ENABLED must be 'true' or 'false'")?;
        }

        if let Some(api_key) = lookup("QKRN_API_KEY") {
            self.api_key = api_key;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            bail!(
                "log_level must be one of: {}, got '{}'",
                LOG_LEVELS.join(", "),
                self.log_level
            );
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }

    fn masked_api_key(&self) -> String {
        match self.api_key.chars().count() {
            0 => "(none)".to_string(),
            n if n <= 8 => "*".repeat(n),
            _ => format!("{}...", self.api_key.chars().take(4).collect::<String>()),
        }
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        let source = self
            .source
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "defaults".to_string());
        tracing::info!("  Source: {}", source);
        tracing::info!("  Node id: {}", self.node_id);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!(
            "  Authentication: {}",
            if self.auth_enabled { "enabled" } else { "disabled" }
        );
        tracing::info!("  API key: {}", self.masked_api_key());
        tracing::info!("  Service listening on: {}", self.listen_addr());
    }
}
