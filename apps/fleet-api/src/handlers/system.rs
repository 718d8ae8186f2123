//! 系统接口
//!
//! - GET /health
//! - GET /metrics：进程内请求计数快照
//! - 未匹配路由的 404

use crate::utils::response::{not_found_error, ok};
use api_contract::{HealthResponse, MetricsSnapshotDto};
use axum::{http::Uri, response::Response};
use fleet_observability::metrics;

pub async fn health() -> Response {
    ok(HealthResponse { ok: true })
}

pub async fn get_metrics() -> Response {
    let snapshot = metrics().snapshot();
    ok(MetricsSnapshotDto {
        requests: snapshot.requests,
        client_errors: snapshot.client_errors,
        server_errors: snapshot.server_errors,
        latency_ms_total: snapshot.latency_ms_total,
        latency_ms_count: snapshot.latency_ms_count,
        store_fallbacks: snapshot.store_fallbacks,
    })
}

pub async fn route_not_found(uri: Uri) -> Response {
    not_found_error(format!("route {} not found", uri.path()))
}
