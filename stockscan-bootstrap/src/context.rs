use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use stockscan_application::AppState;
use stockscan_domain::{ScanEventRepository, TagGenerator};
use stockscan_infrastructure::{
    tag_generator_for, AppConfig, MemoryScanRepository, RestScanRepository,
};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let runtime_config = config.to_runtime_config();
        let store_config = config.to_store_config();

        let scan_repo: Arc<dyn ScanEventRepository> = match &store_config.store_url {
            Some(url) => {
                info!("using hosted store at {} (table {})", url, store_config.store_table);
                Arc::new(RestScanRepository::new(&store_config)?)
            }
            None => {
                warn!("store_url not set, scans are kept in memory only");
                Arc::new(MemoryScanRepository::new())
            }
        };
        let tag_generator = tag_generator_for(runtime_config.tag_strategy);
        info!("tag strategy: {}", tag_generator.strategy().as_str());

        let state = AppState::new(runtime_config, scan_repo, tag_generator);
        Ok(Self { state })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockscan_domain::TagStrategy;

    #[test]
    fn memory_store_without_url() {
        let config = AppConfig {
            tag_strategy: "sequence".to_string(),
            ..AppConfig::default()
        };
        let context = AppContext::new(&config).expect("context");
        assert_eq!(context.state.tag_generator.strategy(), TagStrategy::Sequence);
        assert_eq!(context.state.config.status_clear_ms, 1000);
    }

    #[test]
    fn hosted_store_with_url() {
        let config = AppConfig {
            store_url: Some("https://project.example.co".to_string()),
            store_api_key: Some("anon".to_string()),
            ..AppConfig::default()
        };
        assert!(AppContext::new(&config).is_ok());
    }
}
