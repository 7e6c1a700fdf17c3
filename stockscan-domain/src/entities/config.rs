// Runtime configuration handed to the application layer

use crate::value_objects::TagStrategy;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub tag_strategy: TagStrategy,
    pub status_clear_ms: u64,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3280".to_string(),
            tag_strategy: TagStrategy::Timestamp,
            status_clear_ms: 1000,
            max_body_bytes: 64 * 1024,
            request_timeout_seconds: 15,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub store_url: Option<String>,
    pub store_api_key: Option<String>,
    pub store_table: String,
    pub request_timeout_seconds: u64,
}
