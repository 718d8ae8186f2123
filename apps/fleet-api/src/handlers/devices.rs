//! 设备 CRUD handlers
//!
//! - GET /api/devices - 列出设备（按 ID 升序）
//! - POST /api/devices - 注册设备
//! - GET /api/devices/{id} - 获取设备详情
//! - PUT /api/devices/{id} - 局部更新设备（至少一个字段）
//! - PUT /api/devices/{id}/status - 仅更新状态
//! - DELETE /api/devices/{id} - 删除设备（不级联遥测与告警）

use crate::AppState;
use crate::utils::response::{
    bad_request_error, created, json_rejection_error, ok, repository_error,
};
use crate::utils::{normalize_optional, normalize_required, parse_id, parse_status};
use api_contract::{
    CreateDeviceRequest, MessageResponse, UpdateDeviceRequest, UpdateDeviceStatusRequest,
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    response::Response,
};
use domain::{DeviceUpdate, NewDevice};

/// 列出设备
pub async fn list_devices(State(state): State<AppState>) -> Response {
    match state.repositories.devices.list_all().await {
        Ok(devices) => ok(devices),
        Err(err) => repository_error(err),
    }
}

/// 注册设备
///
/// name / type / location / status 均为必填，status 取值
/// online、offline、warning、critical 之一。成功返回 `201 Created`。
pub async fn create_device(
    State(state): State<AppState>,
    payload: Result<Json<CreateDeviceRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return json_rejection_error(rejection),
    };
    let name = match normalize_required(req.name, "name") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let device_type = match normalize_required(req.device_type, "type") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let location = match normalize_required(req.location, "location") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let status = match normalize_required(req.status, "status")
        .and_then(|value| parse_status(&value))
    {
        Ok(value) => value,
        Err(response) => return response,
    };

    let input = NewDevice {
        name,
        device_type,
        location,
        status,
    };
    match state.repositories.devices.create(input).await {
        Ok(device) => created(device),
        Err(err) => repository_error(err),
    }
}

/// 获取设备详情
pub async fn get_device(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let id = match parse_id(&id, "device id") {
        Ok(id) => id,
        Err(response) => return response,
    };
    match state.repositories.devices.get_by_id(id).await {
        Ok(device) => ok(device),
        Err(err) => repository_error(err),
    }
}

/// 局部更新设备
///
/// 只应用请求体中出现的字段；出现的文本字段不能为空，
/// 请求体不含任何字段时返回 400。
pub async fn update_device(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateDeviceRequest>, JsonRejection>,
) -> Response {
    let id = match parse_id(&id, "device id") {
        Ok(id) => id,
        Err(response) => return response,
    };
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return json_rejection_error(rejection),
    };
    let update = match device_update(req) {
        Ok(update) => update,
        Err(response) => return response,
    };
    if update.is_empty() {
        return bad_request_error("empty update");
    }
    match state.repositories.devices.update(id, update).await {
        Ok(device) => ok(device),
        Err(err) => repository_error(err),
    }
}

/// 仅更新设备状态
pub async fn update_device_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateDeviceStatusRequest>, JsonRejection>,
) -> Response {
    let id = match parse_id(&id, "device id") {
        Ok(id) => id,
        Err(response) => return response,
    };
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return json_rejection_error(rejection),
    };
    let status = match normalize_required(req.status, "status")
        .and_then(|value| parse_status(&value))
    {
        Ok(status) => status,
        Err(response) => return response,
    };
    match state.repositories.devices.update_status(id, status).await {
        Ok(device) => ok(device),
        Err(err) => repository_error(err),
    }
}

/// 删除设备；设备不存在时同样返回成功
pub async fn delete_device(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let id = match parse_id(&id, "device id") {
        Ok(id) => id,
        Err(response) => return response,
    };
    match state.repositories.devices.delete(id).await {
        Ok(()) => ok(MessageResponse::new("device deleted")),
        Err(err) => repository_error(err),
    }
}

fn device_update(req: UpdateDeviceRequest) -> Result<DeviceUpdate, Response> {
    let status = match normalize_optional(req.status, "status")? {
        Some(value) => Some(parse_status(&value)?),
        None => None,
    };
    Ok(DeviceUpdate {
        name: normalize_optional(req.name, "name")?,
        device_type: normalize_optional(req.device_type, "type")?,
        location: normalize_optional(req.location, "location")?,
        status,
    })
}
