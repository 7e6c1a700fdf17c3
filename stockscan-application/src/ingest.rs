//! Scan ingestion resolver.
//!
//! Decides whether a parsed scan opens a new inbound transaction or is a
//! rescan of one that is still open, and applies the matching write.

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use stockscan_domain::ports::{ScanEventRepository, TagGenerator};
use stockscan_domain::{
    ActionType, IngestOutcome, LookupKey, ParsedBarcode, ScanEvent, ScanStamp,
};

use crate::AppState;

/// Resolves `parsed` while holding the per-key lock, so concurrent scans of
/// the same key on this process see each other's writes.
pub async fn ingest(state: &AppState, parsed: &ParsedBarcode, now: DateTime<Local>) -> IngestOutcome {
    let key = parsed.lookup_key();
    let _guard = state.key_locks.lock(&key).await;
    resolve(
        state.scan_repo.as_ref(),
        state.tag_generator.as_ref(),
        parsed,
        &key,
        &now,
    )
    .await
}

pub async fn resolve(
    repo: &dyn ScanEventRepository,
    tags: &dyn TagGenerator,
    parsed: &ParsedBarcode,
    key: &LookupKey,
    now: &DateTime<Local>,
) -> IngestOutcome {
    let stamp = ScanStamp::at(now);

    let existing = match repo.find_open_inbound(key).await {
        Ok(existing) => existing,
        Err(err) => {
            warn!("lookup for {} failed: {}", key, err);
            return IngestOutcome::Failed {
                message: err.to_string(),
            };
        }
    };

    match existing {
        Some(existing) => {
            debug!("{} already open, refreshing scan time", key);
            let Some(id) = existing.id else {
                warn!("open scan event for {} has no id", key);
                return IngestOutcome::Failed {
                    message: format!("stored scan event for {} has no id", key),
                };
            };
            match repo.update_scan_timestamp(id, &stamp).await {
                Ok(updated) => {
                    info!(row_id = id, "rescan of {} at {}", key, stamp.scan_time);
                    IngestOutcome::Updated(updated)
                }
                Err(err) => {
                    warn!("timestamp update for {} failed: {}", key, err);
                    IngestOutcome::Failed {
                        message: err.to_string(),
                    }
                }
            }
        }
        None => {
            let row = build_inbound_row(parsed, tags, now, stamp);
            match repo.insert_inbound(&row).await {
                Ok(inserted) => {
                    info!(
                        part_number = %inserted.part_number,
                        tag_number = %inserted.tag_number,
                        "new inbound scan {}",
                        key
                    );
                    IngestOutcome::Inserted(inserted)
                }
                Err(err) => {
                    warn!("insert for {} failed: {}", key, err);
                    IngestOutcome::Failed {
                        message: err.to_string(),
                    }
                }
            }
        }
    }
}

/// Row for a first scan. Part/category codes carry no quantity or tag, so
/// they get one unit and a generated tag; labels bring their own.
pub fn build_inbound_row(
    parsed: &ParsedBarcode,
    tags: &dyn TagGenerator,
    now: &DateTime<Local>,
    stamp: ScanStamp,
) -> ScanEvent {
    let (part_number, category, quantity, tag_number) = match parsed {
        ParsedBarcode::PartCategory(code) => (
            code.part_number.clone(),
            Some(code.category.clone()),
            1,
            tags.next_tag(now),
        ),
        ParsedBarcode::Bracketed(label) => (
            label.part.clone(),
            None,
            label.quantity,
            label.tag.clone(),
        ),
    };
    ScanEvent {
        id: None,
        part_number,
        category,
        quantity,
        tag_number,
        raw_data: parsed.raw_data().to_string(),
        action_type: ActionType::In.as_str().to_string(),
        scan_date: stamp.scan_date,
        scan_time: stamp.scan_time,
    }
}
