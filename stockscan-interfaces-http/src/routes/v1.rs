use axum::Router;

use stockscan_application::AppState;

use crate::handlers::{ops_handlers, query_handlers, scan_handlers};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/v1/scan/keyboard",
            axum::routing::post(scan_handlers::scan_keyboard),
        )
        .route(
            "/v1/scan/camera",
            axum::routing::post(scan_handlers::scan_camera),
        )
        .route(
            "/v1/scan/status",
            axum::routing::get(query_handlers::get_scan_status),
        )
        .route(
            "/v1/scans/recent",
            axum::routing::get(query_handlers::list_recent_scans),
        )
        .route(
            "/v1/scans/open",
            axum::routing::get(query_handlers::find_open_scan),
        )
        .route(
            "/v1/ops/health/live",
            axum::routing::get(ops_handlers::health_live),
        )
        .route(
            "/v1/ops/health/ready",
            axum::routing::get(ops_handlers::health_ready),
        )
        .route(
            "/v1/ops/metrics/prometheus",
            axum::routing::get(ops_handlers::metrics_prometheus),
        )
        .with_state(state)
}
