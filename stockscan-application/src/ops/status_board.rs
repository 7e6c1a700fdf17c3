use std::sync::Arc;
use std::time::Duration;

use stockscan_domain::{current_millis, ScanReport, ScanStatus};
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Default)]
struct BoardState {
    status: ScanStatus,
    generation: u64,
}

/// Last scan result shown at the station, reset to the ready baseline a
/// short while after each scan.
#[derive(Debug, Default)]
pub struct StatusBoard {
    state: RwLock<BoardState>,
}

impl StatusBoard {
    pub async fn snapshot(&self) -> ScanStatus {
        self.state.read().await.status.clone()
    }

    /// Shows `report` and returns the generation a later clear must match.
    pub async fn show(&self, report: &ScanReport) -> u64 {
        let mut state = self.state.write().await;
        state.generation += 1;
        state.status = ScanStatus {
            status: report.status,
            message: report.message.clone(),
            cue: Some(report.cue),
            updated_at: current_millis(),
        };
        state.generation
    }

    /// Resets to ready unless a newer scan has been shown since.
    pub async fn clear_if_current(&self, generation: u64) -> bool {
        let mut state = self.state.write().await;
        if state.generation != generation {
            return false;
        }
        state.status = ScanStatus {
            updated_at: current_millis(),
            ..ScanStatus::default()
        };
        true
    }

    pub fn schedule_clear(self: &Arc<Self>, generation: u64, delay: Duration) {
        let board = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if !board.clear_if_current(generation).await {
                debug!("status clear {} superseded", generation);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockscan_domain::{InputChannel, ScanRejection, ScanStatusKind};

    fn rejected_report() -> ScanReport {
        ScanReport::rejected(InputChannel::Keyboard, &ScanRejection::InvalidFormat)
    }

    #[tokio::test(start_paused = true)]
    async fn status_returns_to_ready_after_delay() {
        let board = Arc::new(StatusBoard::default());
        let generation = board.show(&rejected_report()).await;
        board.schedule_clear(generation, Duration::from_millis(1000));
        assert_eq!(board.snapshot().await.status, ScanStatusKind::Rejected);

        tokio::time::sleep(Duration::from_millis(1001)).await;
        let status = board.snapshot().await;
        assert_eq!(status.status, ScanStatusKind::Ready);
        assert!(status.message.is_empty());
        assert!(status.cue.is_none());
    }

    #[tokio::test]
    async fn stale_clear_keeps_newer_status() {
        let board = StatusBoard::default();
        let first = board.show(&rejected_report()).await;
        let second = board.show(&rejected_report()).await;

        assert!(!board.clear_if_current(first).await);
        assert_eq!(board.snapshot().await.status, ScanStatusKind::Rejected);
        assert!(board.clear_if_current(second).await);
        assert_eq!(board.snapshot().await.status, ScanStatusKind::Ready);
    }
}
