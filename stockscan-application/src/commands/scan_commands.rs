use std::time::Duration;

use chrono::{DateTime, Local};
use tracing::warn;

use stockscan_domain::{classify, local_now, InputChannel, ScanReport};

use crate::ingest::ingest;
use crate::AppState;

/// Single entry point for every input channel: classify, resolve, show the
/// result on the status board and schedule its reset.
pub async fn submit_scan(state: &AppState, channel: InputChannel, raw_text: &str) -> ScanReport {
    submit_scan_at(state, channel, raw_text, local_now()).await
}

pub async fn submit_scan_at(
    state: &AppState,
    channel: InputChannel,
    raw_text: &str,
    now: DateTime<Local>,
) -> ScanReport {
    state.metrics.record_received();

    let report = match classify(raw_text) {
        Ok(parsed) => {
            let key = parsed.lookup_key();
            let outcome = ingest(state, &parsed, now).await;
            state.metrics.record_outcome(&outcome);
            ScanReport::resolved(channel, key, &outcome)
        }
        Err(rejection) => {
            state.metrics.record_rejected();
            warn!(
                channel = channel.as_str(),
                reason = rejection.reason_code(),
                "scan rejected: {}",
                rejection
            );
            ScanReport::rejected(channel, &rejection)
        }
    };

    let generation = state.status_board.show(&report).await;
    state
        .status_board
        .schedule_clear(generation, Duration::from_millis(state.config.status_clear_ms));
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use stockscan_domain::{ScanCue, ScanStatusKind};

    use crate::test_support::{at, state_with, FakeStore};

    #[tokio::test]
    async fn rejected_scan_reports_reason_and_error_cue() {
        let state = state_with(Arc::new(FakeStore::default()));
        let report = submit_scan_at(&state, InputChannel::Keyboard, "hello", at(8, 0, 0)).await;

        assert_eq!(report.status, ScanStatusKind::Rejected);
        assert_eq!(report.cue, ScanCue::Error);
        assert_eq!(report.reason_code.as_deref(), Some("invalid_format"));
        assert!(report.message.contains("*EOT"));
        assert!(report.receipt.is_none());
    }

    #[tokio::test]
    async fn channels_behave_identically() {
        let state = state_with(Arc::new(FakeStore::default()));
        let keyboard =
            submit_scan_at(&state, InputChannel::Keyboard, "49560-L3010\n", at(8, 0, 0)).await;
        let camera = submit_scan_at(&state, InputChannel::Camera, " 49560-L3010", at(8, 0, 1)).await;

        assert_eq!(keyboard.status, ScanStatusKind::Inserted);
        assert_eq!(keyboard.cue, ScanCue::Success);
        assert_eq!(camera.status, ScanStatusKind::Updated);
        assert_eq!(camera.cue, ScanCue::Duplicate);
        assert_eq!(keyboard.lookup_key, camera.lookup_key);

        let receipt = camera.receipt.expect("receipt");
        assert_eq!(receipt.part_number, "49560");
        assert_eq!(receipt.quantity, 1);
        assert_eq!(receipt.category.as_deref(), Some("L3010"));
        assert_eq!(receipt.scanned_at, "2026-10-16 08:00:01");
        assert_eq!(state.metrics.inserted(), 1);
        assert_eq!(state.metrics.updated(), 1);
    }

    #[tokio::test]
    async fn store_failure_is_shown_on_the_board() {
        let store = Arc::new(FakeStore {
            fail_lookup: Some("JWT expired".to_string()),
            ..FakeStore::default()
        });
        let state = state_with(store);
        let report = submit_scan_at(&state, InputChannel::Camera, "49560-L3010", at(8, 0, 0)).await;

        assert_eq!(report.status, ScanStatusKind::Failed);
        assert_eq!(report.message, "JWT expired");
        assert_eq!(report.reason_code.as_deref(), Some("store_failure"));

        let status = state.status_board.snapshot().await;
        assert_eq!(status.status, ScanStatusKind::Failed);
        assert_eq!(status.cue, Some(ScanCue::Error));
    }
}
