use std::sync::Arc;

use stockscan_domain::ports::{ScanEventRepository, TagGenerator};
use stockscan_domain::RuntimeConfig;

use crate::ops::{KeyedLocks, StatusBoard};
use crate::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub scan_repo: Arc<dyn ScanEventRepository>,
    pub tag_generator: Arc<dyn TagGenerator>,
    pub key_locks: Arc<KeyedLocks>,
    pub status_board: Arc<StatusBoard>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(
        config: RuntimeConfig,
        scan_repo: Arc<dyn ScanEventRepository>,
        tag_generator: Arc<dyn TagGenerator>,
    ) -> Self {
        Self {
            config,
            scan_repo,
            tag_generator,
            key_locks: Arc::new(KeyedLocks::default()),
            status_board: Arc::new(StatusBoard::default()),
            metrics: Arc::new(Metrics::default()),
        }
    }
}
