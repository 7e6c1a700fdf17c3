use tracing::error;

use stockscan_domain::{normalize, parse_date, KeyField, LookupKey, OpenScanQuery, RecentScansQuery, ScanEvent};

use crate::AppError;
use crate::AppState;

pub async fn list_recent_scans(
    state: &AppState,
    query: RecentScansQuery,
) -> Result<Vec<ScanEvent>, AppError> {
    let date = query
        .date
        .map(|date| date.trim().to_string())
        .filter(|date| !date.is_empty());
    if let Some(date) = date.as_deref() {
        if let Err(err) = parse_date(date) {
            return Err(AppError::BadRequest(format!("invalid date: {}", err)));
        }
    }

    let limit = query.limit.unwrap_or(50).clamp(1, 200);
    state
        .scan_repo
        .list_recent(date.as_deref(), limit)
        .await
        .map_err(|err| {
            error!("failed to list recent scans: {}", err);
            AppError::Internal(err)
        })
}

pub async fn find_open_scan(state: &AppState, query: OpenScanQuery) -> Result<ScanEvent, AppError> {
    let field = match query.field.as_deref() {
        None => KeyField::RawData,
        Some(raw) => KeyField::parse(raw).ok_or_else(|| {
            AppError::BadRequest(format!(
                "unknown field '{}', expected raw_data or tag_number",
                raw
            ))
        })?,
    };
    let value = normalize(&query.value);
    if value.is_empty() {
        return Err(AppError::BadRequest("value is empty".to_string()));
    }

    let key = LookupKey { field, value };
    let found = state.scan_repo.find_open_inbound(&key).await.map_err(|err| {
        error!("failed to look up {}: {}", key, err);
        AppError::Internal(err)
    })?;
    found.ok_or_else(|| AppError::NotFound(format!("no open inbound scan for {}", key)))
}
