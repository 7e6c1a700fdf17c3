use std::sync::atomic::{AtomicI64, Ordering};

use anyhow::anyhow;
use async_trait::async_trait;
use tokio::sync::RwLock;

use stockscan_domain::{LookupKey, ScanEvent, ScanEventRepository, ScanStamp};

/// Process-local transactions store. Used when no hosted store is
/// configured; rows are gone when the process exits.
#[derive(Debug)]
pub struct MemoryScanRepository {
    rows: RwLock<Vec<ScanEvent>>,
    next_id: AtomicI64,
}

impl MemoryScanRepository {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

impl Default for MemoryScanRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScanEventRepository for MemoryScanRepository {
    async fn find_open_inbound(&self, key: &LookupKey) -> anyhow::Result<Option<ScanEvent>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|row| row.matches_open_inbound(key)).cloned())
    }

    async fn update_scan_timestamp(&self, id: i64, stamp: &ScanStamp) -> anyhow::Result<ScanEvent> {
        let mut rows = self.rows.write().await;
        let row = rows
            .iter_mut()
            .find(|row| row.id == Some(id))
            .ok_or_else(|| anyhow!("scan event {} not found", id))?;
        row.apply_stamp(stamp);
        Ok(row.clone())
    }

    async fn insert_inbound(&self, event: &ScanEvent) -> anyhow::Result<ScanEvent> {
        let mut stored = event.clone();
        stored.id = Some(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.rows.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn list_recent(&self, date: Option<&str>, limit: usize) -> anyhow::Result<Vec<ScanEvent>> {
        let rows = self.rows.read().await;
        let mut matching: Vec<ScanEvent> = rows
            .iter()
            .filter(|row| date.map(|date| row.scan_date == date).unwrap_or(true))
            .cloned()
            .collect();
        // RFC 3339 strings with one offset sort chronologically; id breaks ties.
        matching.sort_by(|a, b| b.scan_time.cmp(&a.scan_time).then(b.id.cmp(&a.id)));
        matching.truncate(limit);
        Ok(matching)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(raw: &str, tag: &str, scan_time: &str) -> ScanEvent {
        ScanEvent {
            id: None,
            part_number: raw[..5].to_string(),
            category: Some(raw[6..].to_string()),
            quantity: 1,
            tag_number: tag.to_string(),
            raw_data: raw.to_string(),
            action_type: "IN".to_string(),
            scan_date: scan_time[..10].to_string(),
            scan_time: scan_time.to_string(),
        }
    }

    #[tokio::test]
    async fn inserted_rows_are_found_by_either_key() {
        let repo = MemoryScanRepository::new();
        let stored = repo
            .insert_inbound(&row("49560-L3010", "T1", "2026-10-16T09:00:00.000+00:00"))
            .await
            .expect("insert");
        assert_eq!(stored.id, Some(1));

        let by_raw = repo
            .find_open_inbound(&LookupKey::raw_data("49560-L3010"))
            .await
            .expect("lookup");
        let by_tag = repo
            .find_open_inbound(&LookupKey::tag_number("T1"))
            .await
            .expect("lookup");
        assert_eq!(by_raw.as_ref(), Some(&stored));
        assert_eq!(by_tag.as_ref(), Some(&stored));
    }

    #[tokio::test]
    async fn timestamp_update_leaves_other_columns() {
        let repo = MemoryScanRepository::new();
        let stored = repo
            .insert_inbound(&row("49560-L3010", "T1", "2026-10-16T09:00:00.000+00:00"))
            .await
            .expect("insert");
        let stamp = ScanStamp {
            scan_date: "2026-10-17".to_string(),
            scan_time: "2026-10-17T07:00:00.000+00:00".to_string(),
        };
        let updated = repo
            .update_scan_timestamp(1, &stamp)
            .await
            .expect("update");
        assert_eq!(updated.scan_time, stamp.scan_time);
        assert_eq!(updated.tag_number, stored.tag_number);
        assert_eq!(updated.quantity, stored.quantity);

        assert!(repo.update_scan_timestamp(42, &stamp).await.is_err());
    }

    #[tokio::test]
    async fn recent_rows_are_newest_first() {
        let repo = MemoryScanRepository::new();
        for (raw, time) in [
            ("10000-A0001", "2026-10-16T09:00:00.000+00:00"),
            ("10000-A0002", "2026-10-16T11:00:00.000+00:00"),
            ("10000-A0003", "2026-10-15T23:00:00.000+00:00"),
        ] {
            repo.insert_inbound(&row(raw, raw, time)).await.expect("insert");
        }

        let all = repo.list_recent(None, 10).await.expect("list");
        let order: Vec<&str> = all.iter().map(|row| row.raw_data.as_str()).collect();
        assert_eq!(order, vec!["10000-A0002", "10000-A0001", "10000-A0003"]);

        let day = repo.list_recent(Some("2026-10-15"), 10).await.expect("list");
        assert_eq!(day.len(), 1);
        assert_eq!(repo.list_recent(None, 1).await.expect("list").len(), 1);
    }
}
