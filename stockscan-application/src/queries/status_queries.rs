use stockscan_domain::ScanStatus;

use crate::AppState;

pub async fn current_status(state: &AppState) -> ScanStatus {
    state.status_board.snapshot().await
}
