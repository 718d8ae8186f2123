//! 遥测 handlers
//!
//! - GET /api/telemetry?limit=N - 最近 N 条遥测（默认 100）
//! - POST /api/telemetry - 上报遥测（不校验设备是否存在）
//! - GET /api/telemetry/device/{id}?limit=N - 设备最近 N 条遥测（默认 50，最新在前）
//! - GET /api/devices/{id}/telemetry?hours=N - 设备最近 N 小时遥测（默认 24）
//! - GET /api/devices/{id}/telemetry/latest - 设备最新一条遥测（无数据时为 null）

use crate::AppState;
use crate::utils::response::{created, json_rejection_error, ok, repository_error};
use crate::utils::{parse_hours, parse_id, parse_limit, require_value};
use api_contract::{CreateTelemetryRequest, HoursQuery, LimitQuery};
use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    response::Response,
};
use domain::NewTelemetry;

pub const DEFAULT_TELEMETRY_LIMIT: usize = 100;
pub const DEFAULT_DEVICE_TELEMETRY_LIMIT: usize = 50;
pub const DEFAULT_PERIOD_HOURS: i64 = 24;

pub async fn list_telemetry(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Response {
    let limit = parse_limit(query.limit.as_deref(), DEFAULT_TELEMETRY_LIMIT);
    match state.repositories.telemetry.list_all(limit).await {
        Ok(items) => ok(items),
        Err(err) => repository_error(err),
    }
}

pub async fn list_device_telemetry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<LimitQuery>,
) -> Response {
    let device_id = match parse_id(&id, "device id") {
        Ok(id) => id,
        Err(response) => return response,
    };
    let limit = parse_limit(query.limit.as_deref(), DEFAULT_DEVICE_TELEMETRY_LIMIT);
    match state
        .repositories
        .telemetry
        .list_by_device(device_id, limit)
        .await
    {
        Ok(items) => ok(items),
        Err(err) => repository_error(err),
    }
}

pub async fn device_telemetry_for_period(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<HoursQuery>,
) -> Response {
    let device_id = match parse_id(&id, "device id") {
        Ok(id) => id,
        Err(response) => return response,
    };
    let hours = parse_hours(query.hours.as_deref(), DEFAULT_PERIOD_HOURS);
    match state
        .repositories
        .telemetry
        .for_period(device_id, hours)
        .await
    {
        Ok(items) => ok(items),
        Err(err) => repository_error(err),
    }
}

pub async fn latest_device_telemetry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let device_id = match parse_id(&id, "device id") {
        Ok(id) => id,
        Err(response) => return response,
    };
    match state.repositories.telemetry.latest(device_id).await {
        Ok(item) => ok(item),
        Err(err) => repository_error(err),
    }
}

/// 上报遥测
///
/// 全部字段必填；batteryLevel / cpuUsage 取值 [0, 100]，
/// memoryUsage / memoryTotal 非负。成功返回 `201 Created`。
pub async fn create_telemetry(
    State(state): State<AppState>,
    payload: Result<Json<CreateTelemetryRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return json_rejection_error(rejection),
    };
    let input = match new_telemetry(req) {
        Ok(input) => input,
        Err(response) => return response,
    };
    match state.repositories.telemetry.create(input).await {
        Ok(item) => created(item),
        Err(err) => repository_error(err),
    }
}

fn new_telemetry(req: CreateTelemetryRequest) -> Result<NewTelemetry, Response> {
    Ok(NewTelemetry {
        device_id: require_value(req.device_id, "deviceId")?,
        battery_level: require_value(req.battery_level, "batteryLevel")?,
        temperature: require_value(req.temperature, "temperature")?,
        cpu_usage: require_value(req.cpu_usage, "cpuUsage")?,
        memory_usage: require_value(req.memory_usage, "memoryUsage")?,
        memory_total: require_value(req.memory_total, "memoryTotal")?,
    })
}
