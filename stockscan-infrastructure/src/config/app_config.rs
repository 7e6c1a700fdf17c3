use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use stockscan_domain::{RuntimeConfig, StoreConfig, TagStrategy};

use crate::config::validation::{validate_store_url, validate_table_name};

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub store_url: Option<String>,
    pub store_api_key: Option<String>,
    pub store_table: String,
    pub tag_strategy: String,
    pub status_clear_ms: u64,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
    pub log_dir: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3280".to_string(),
            store_url: None,
            store_api_key: None,
            store_table: "transactions".to_string(),
            tag_strategy: "timestamp".to_string(),
            status_clear_ms: 1000,
            max_body_bytes: 64 * 1024,
            request_timeout_seconds: 15,
            log_dir: None,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var("STOCKSCAN_CONFIG").unwrap_or_else(|_| "./config.toml".to_string());
        Self::load_from(path).await
    }

    pub async fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let file_path = path.as_ref();
        let base_dir = file_path.parent();
        let mut config = if file_path.exists() {
            let content = fs::read_to_string(file_path).await?;
            toml::from_str::<AppConfig>(&content)?
        } else {
            warn!("{} not found, using defaults", file_path.display());
            AppConfig::default()
        };
        config.apply_env_overrides();
        config.resolve_paths(base_dir);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn normalize(&mut self) {
        self.store_url = normalize_optional(self.store_url.take())
            .map(|url| url.trim_end_matches('/').to_string());
        self.store_api_key = normalize_optional(self.store_api_key.take());
        self.log_dir = normalize_optional(self.log_dir.take());
        self.store_table = self.store_table.trim().to_string();
        self.tag_strategy = self.tag_strategy.trim().to_lowercase();
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        if let Some(log_dir) = &self.log_dir {
            self.log_dir = Some(resolve_path(base, log_dir));
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        validate_table_name(&self.store_table)?;
        if let Some(url) = &self.store_url {
            validate_store_url(url)?;
        }
        self.tag_strategy.parse::<TagStrategy>()?;
        if self.status_clear_ms == 0 {
            return Err(anyhow!("status_clear_ms must be greater than 0"));
        }
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            tag_strategy: self.tag_strategy.parse().unwrap_or_default(),
            status_clear_ms: self.status_clear_ms,
            max_body_bytes: self.max_body_bytes,
            request_timeout_seconds: self.request_timeout_seconds,
        }
    }

    pub fn to_store_config(&self) -> StoreConfig {
        StoreConfig {
            store_url: self.store_url.clone(),
            store_api_key: self.store_api_key.clone(),
            store_table: self.store_table.clone(),
            request_timeout_seconds: self.request_timeout_seconds,
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("STOCKSCAN_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Ok(value) = env::var("STOCKSCAN_STORE_URL") {
            self.store_url = Some(value);
        }
        if let Ok(value) = env::var("STOCKSCAN_STORE_API_KEY") {
            self.store_api_key = Some(value);
        }
        if let Ok(value) = env::var("STOCKSCAN_STORE_TABLE") {
            self.store_table = value;
        }
        if let Ok(value) = env::var("STOCKSCAN_TAG_STRATEGY") {
            self.tag_strategy = value;
        }
        if let Ok(value) = env::var("STOCKSCAN_STATUS_CLEAR_MS") {
            self.status_clear_ms = value.parse().unwrap_or(self.status_clear_ms);
        }
        if let Ok(value) = env::var("STOCKSCAN_MAX_BODY_BYTES") {
            self.max_body_bytes = value.parse().unwrap_or(self.max_body_bytes);
        }
        if let Ok(value) = env::var("STOCKSCAN_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
        if let Ok(value) = env::var("STOCKSCAN_LOG_DIR") {
            self.log_dir = Some(value);
        }
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}
