use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone};
use tokio::sync::Mutex;

use stockscan_domain::{
    LookupKey, RuntimeConfig, ScanEvent, ScanEventRepository, ScanStamp, TagGenerator,
    TagStrategy,
};

use crate::AppState;

#[derive(Default)]
pub struct FakeStore {
    pub rows: Mutex<Vec<ScanEvent>>,
    pub lookup_delay: Option<Duration>,
    pub fail_lookup: Option<String>,
    pub fail_update: Option<String>,
    pub fail_insert: Option<String>,
    pub inserts: AtomicU64,
}

impl FakeStore {
    pub async fn rows(&self) -> Vec<ScanEvent> {
        self.rows.lock().await.clone()
    }
}

#[async_trait]
impl ScanEventRepository for FakeStore {
    async fn find_open_inbound(&self, key: &LookupKey) -> anyhow::Result<Option<ScanEvent>> {
        if let Some(delay) = self.lookup_delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(message) = &self.fail_lookup {
            return Err(anyhow!(message.clone()));
        }
        let rows = self.rows.lock().await;
        Ok(rows.iter().find(|row| row.matches_open_inbound(key)).cloned())
    }

    async fn update_scan_timestamp(&self, id: i64, stamp: &ScanStamp) -> anyhow::Result<ScanEvent> {
        if let Some(message) = &self.fail_update {
            return Err(anyhow!(message.clone()));
        }
        let mut rows = self.rows.lock().await;
        let row = rows
            .iter_mut()
            .find(|row| row.id == Some(id))
            .ok_or_else(|| anyhow!("row {} not found", id))?;
        row.apply_stamp(stamp);
        Ok(row.clone())
    }

    async fn insert_inbound(&self, event: &ScanEvent) -> anyhow::Result<ScanEvent> {
        if let Some(message) = &self.fail_insert {
            return Err(anyhow!(message.clone()));
        }
        let id = self.inserts.fetch_add(1, Ordering::SeqCst) as i64 + 1;
        let mut stored = event.clone();
        stored.id = Some(id);
        self.rows.lock().await.push(stored.clone());
        Ok(stored)
    }

    async fn list_recent(&self, date: Option<&str>, limit: usize) -> anyhow::Result<Vec<ScanEvent>> {
        let rows = self.rows.lock().await;
        Ok(rows
            .iter()
            .rev()
            .filter(|row| date.map(|date| row.scan_date == date).unwrap_or(true))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

pub struct FixedTags;

impl TagGenerator for FixedTags {
    fn next_tag(&self, now: &DateTime<Local>) -> String {
        format!("T{}", now.timestamp_millis())
    }

    fn strategy(&self) -> TagStrategy {
        TagStrategy::Timestamp
    }
}

pub fn state_with(store: Arc<FakeStore>) -> AppState {
    AppState::new(RuntimeConfig::default(), store, Arc::new(FixedTags))
}

pub fn at(hour: u32, minute: u32, second: u32) -> DateTime<Local> {
    Local
        .with_ymd_and_hms(2026, 10, 16, hour, minute, second)
        .earliest()
        .expect("local instant")
}
