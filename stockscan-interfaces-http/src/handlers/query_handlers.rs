use axum::extract::{Query, State};
use axum::Json;

use stockscan_application::queries::{scan_queries, status_queries};
use stockscan_application::AppState;
use stockscan_domain::{OpenScanQuery, RecentScansQuery, ScanEvent, ScanStatus};

use crate::error::HttpError;

pub async fn list_recent_scans(
    State(state): State<AppState>,
    Query(query): Query<RecentScansQuery>,
) -> Result<Json<Vec<ScanEvent>>, HttpError> {
    let rows = scan_queries::list_recent_scans(&state, query).await?;
    Ok(Json(rows))
}

pub async fn find_open_scan(
    State(state): State<AppState>,
    Query(query): Query<OpenScanQuery>,
) -> Result<Json<ScanEvent>, HttpError> {
    let row = scan_queries::find_open_scan(&state, query).await?;
    Ok(Json(row))
}

pub async fn get_scan_status(State(state): State<AppState>) -> Json<ScanStatus> {
    Json(status_queries::current_status(&state).await)
}
