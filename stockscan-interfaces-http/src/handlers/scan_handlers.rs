use axum::extract::State;
use axum::Json;

use stockscan_application::commands::scan_commands;
use stockscan_application::AppState;
use stockscan_domain::{CameraScanRequest, InputChannel, KeyboardScanRequest, ScanReport};

// Rejections and store failures are reported in the body, not as HTTP errors;
// the scanner always gets a cue back.

pub async fn scan_keyboard(
    State(state): State<AppState>,
    Json(payload): Json<KeyboardScanRequest>,
) -> Json<ScanReport> {
    let report = scan_commands::submit_scan(&state, InputChannel::Keyboard, &payload.text).await;
    Json(report)
}

pub async fn scan_camera(
    State(state): State<AppState>,
    Json(payload): Json<CameraScanRequest>,
) -> Json<ScanReport> {
    let report =
        scan_commands::submit_scan(&state, InputChannel::Camera, &payload.decoded_text).await;
    Json(report)
}
