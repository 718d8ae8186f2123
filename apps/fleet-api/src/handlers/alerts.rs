//! 告警 handlers
//!
//! - GET /api/alerts?limit=N - 最近 N 条告警（默认 50）
//! - POST /api/alerts - 创建告警
//! - GET /api/alerts/active - 未确认告警
//! - PUT|POST /api/alerts/{id}/acknowledge - 确认告警（幂等）
//! - GET /api/devices/{id}/alerts - 设备告警

use crate::AppState;
use crate::utils::response::{created, json_rejection_error, ok, repository_error};
use crate::utils::{normalize_required, parse_id, parse_limit, parse_severity, require_value};
use api_contract::{CreateAlertRequest, LimitQuery};
use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    response::Response,
};
use domain::NewAlert;

pub const DEFAULT_ALERT_LIMIT: usize = 50;

pub async fn list_alerts(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Response {
    let limit = parse_limit(query.limit.as_deref(), DEFAULT_ALERT_LIMIT);
    match state.repositories.alerts.list_all(limit).await {
        Ok(alerts) => ok(alerts),
        Err(err) => repository_error(err),
    }
}

pub async fn list_active_alerts(State(state): State<AppState>) -> Response {
    match state.repositories.alerts.list_unacknowledged().await {
        Ok(alerts) => ok(alerts),
        Err(err) => repository_error(err),
    }
}

pub async fn list_device_alerts(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let device_id = match parse_id(&id, "device id") {
        Ok(id) => id,
        Err(response) => return response,
    };
    match state.repositories.alerts.list_by_device(device_id).await {
        Ok(alerts) => ok(alerts),
        Err(err) => repository_error(err),
    }
}

pub async fn create_alert(
    State(state): State<AppState>,
    payload: Result<Json<CreateAlertRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return json_rejection_error(rejection),
    };
    let input = match new_alert(req) {
        Ok(input) => input,
        Err(response) => return response,
    };
    match state.repositories.alerts.create(input).await {
        Ok(alert) => created(alert),
        Err(err) => repository_error(err),
    }
}

pub async fn acknowledge_alert(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let id = match parse_id(&id, "alert id") {
        Ok(id) => id,
        Err(response) => return response,
    };
    match state.repositories.alerts.acknowledge(id).await {
        Ok(alert) => ok(alert),
        Err(err) => repository_error(err),
    }
}

fn new_alert(req: CreateAlertRequest) -> Result<NewAlert, Response> {
    let severity = normalize_required(req.severity, "severity")?;
    Ok(NewAlert {
        device_id: require_value(req.device_id, "deviceId")?,
        alert_type: normalize_required(req.alert_type, "type")?,
        message: normalize_required(req.message, "message")?,
        severity: parse_severity(&severity)?,
    })
}
