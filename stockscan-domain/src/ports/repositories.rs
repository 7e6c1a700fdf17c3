use async_trait::async_trait;

use crate::entities::{ScanEvent, ScanStamp};
use crate::value_objects::LookupKey;

/// Transactions store holding scan events.
///
/// Every call is a separate round trip to the hosted store and may fail;
/// callers observe each result once and do not retry.
#[async_trait]
pub trait ScanEventRepository: Send + Sync {
    /// Row matching `key` with `action_type = "IN"`, if any.
    async fn find_open_inbound(&self, key: &LookupKey) -> anyhow::Result<Option<ScanEvent>>;
    /// Rewrites only `scan_date` and `scan_time` of row `id`.
    async fn update_scan_timestamp(&self, id: i64, stamp: &ScanStamp) -> anyhow::Result<ScanEvent>;
    async fn insert_inbound(&self, event: &ScanEvent) -> anyhow::Result<ScanEvent>;
    /// Newest first, optionally restricted to one `scan_date`.
    async fn list_recent(&self, date: Option<&str>, limit: usize) -> anyhow::Result<Vec<ScanEvent>>;
    async fn ping(&self) -> anyhow::Result<()>;
}
