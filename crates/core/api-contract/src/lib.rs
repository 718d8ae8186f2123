//! 稳定的 DTO 与 API 响应契约。
//!
//! 成功响应直接返回实体 JSON（见 `domain`），失败响应统一为 [`ErrorBody`]。
//! 请求体字段全部可选，缺失与取值校验由 handler 统一转换为 400。

use serde::{Deserialize, Serialize};

/// 错误码：请求参数或请求体非法。
pub const INVALID_REQUEST: &str = "INVALID.REQUEST";
/// 错误码：资源不存在。
pub const RESOURCE_NOT_FOUND: &str = "RESOURCE.NOT_FOUND";
/// 错误码：后端存储或内部错误。
pub const INTERNAL_ERROR: &str = "INTERNAL.ERROR";

/// 失败响应体。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
}

impl ErrorBody {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: code.into(),
        }
    }
}

/// 仅包含提示信息的响应体。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// 健康检查响应。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
}

/// 创建设备请求体。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeviceRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub device_type: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
}

/// 更新设备请求体（仅出现的字段生效）。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDeviceRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub device_type: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
}

/// 更新设备状态请求体。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDeviceStatusRequest {
    pub status: Option<String>,
}

/// 上报遥测请求体。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTelemetryRequest {
    pub device_id: Option<i64>,
    pub battery_level: Option<f64>,
    pub temperature: Option<f64>,
    pub cpu_usage: Option<f64>,
    pub memory_usage: Option<f64>,
    pub memory_total: Option<f64>,
}

/// 创建告警请求体。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlertRequest {
    pub device_id: Option<i64>,
    #[serde(rename = "type")]
    pub alert_type: Option<String>,
    pub message: Option<String>,
    pub severity: Option<String>,
}

/// `?limit=N` 查询参数；保留原始字符串，非法值回退为端点默认值。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<String>,
}

/// `?hours=N` 查询参数；非法值回退为默认时间窗口。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HoursQuery {
    pub hours: Option<String>,
}

/// `/metrics` 响应体。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshotDto {
    pub requests: u64,
    pub client_errors: u64,
    pub server_errors: u64,
    pub latency_ms_total: u64,
    pub latency_ms_count: u64,
    pub store_fallbacks: u64,
}
