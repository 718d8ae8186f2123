//! 路由定义
//!
//! 集中管理所有 API 路由，将路径映射到对应的 handlers：
//! - 系统：/health、/metrics
//! - 设备：/api/devices/*
//! - 遥测：/api/telemetry/*、/api/devices/{id}/telemetry/*
//! - 告警：/api/alerts/*、/api/devices/{id}/alerts
//! - 统计：/api/stats
//!
//! 未匹配的路径返回 404 错误体。

use super::AppState;
use super::handlers::*;
use axum::{
    Router,
    routing::{get, put},
};

/// 创建 API 路由
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(get_metrics))
        .route("/api/devices", get(list_devices).post(create_device))
        .route(
            "/api/devices/:id",
            get(get_device).put(update_device).delete(delete_device),
        )
        .route("/api/devices/:id/status", put(update_device_status))
        .route("/api/devices/:id/telemetry", get(device_telemetry_for_period))
        .route("/api/devices/:id/telemetry/latest", get(latest_device_telemetry))
        .route("/api/devices/:id/alerts", get(list_device_alerts))
        .route("/api/telemetry", get(list_telemetry).post(create_telemetry))
        .route("/api/telemetry/device/:id", get(list_device_telemetry))
        .route("/api/alerts", get(list_alerts).post(create_alert))
        .route("/api/alerts/active", get(list_active_alerts))
        .route(
            "/api/alerts/:id/acknowledge",
            put(acknowledge_alert).post(acknowledge_alert),
        )
        .route("/api/stats", get(get_stats))
        .fallback(route_not_found)
}
