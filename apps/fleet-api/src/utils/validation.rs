//! 输入验证辅助函数
//!
//! - normalize_required / normalize_optional：文本字段去除首尾空格并检查非空
//! - require_value：必填的非文本字段
//! - parse_status / parse_severity：枚举字段
//! - parse_id：路径 ID 必须为正整数
//! - parse_limit / parse_hours：查询参数，非法值回退为默认值
//!
//! 失败统一返回 bad_request_error 响应。

use crate::utils::response::bad_request_error;
use axum::response::Response;
use domain::{AlertSeverity, DeviceStatus};

/// 验证必填字段，去除空格并检查非空
pub fn normalize_required(value: Option<String>, field: &str) -> Result<String, Response> {
    match normalize_optional(value, field)? {
        Some(value) => Ok(value),
        None => Err(bad_request_error(format!("{field} required"))),
    }
}

/// 验证可选字段，如果提供则去除空格并检查非空
pub fn normalize_optional(value: Option<String>, field: &str) -> Result<Option<String>, Response> {
    match value {
        Some(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Err(bad_request_error(format!("{field} required")));
            }
            Ok(Some(trimmed.to_string()))
        }
        None => Ok(None),
    }
}

pub fn require_value<T>(value: Option<T>, field: &str) -> Result<T, Response> {
    value.ok_or_else(|| bad_request_error(format!("{field} required")))
}

pub fn parse_status(value: &str) -> Result<DeviceStatus, Response> {
    value
        .trim()
        .parse::<DeviceStatus>()
        .map_err(|err| bad_request_error(err.to_string()))
}

pub fn parse_severity(value: &str) -> Result<AlertSeverity, Response> {
    value
        .trim()
        .parse::<AlertSeverity>()
        .map_err(|err| bad_request_error(err.to_string()))
}

/// 路径 ID：正整数
pub fn parse_id(raw: &str, field: &str) -> Result<i64, Response> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(bad_request_error(format!("invalid {field}: {raw}"))),
    }
}

/// `limit` 查询参数：缺失、非整数或非正数时取默认值
pub fn parse_limit(raw: Option<&str>, default: usize) -> usize {
    parse_positive(raw).map_or(default, |value| usize::try_from(value).unwrap_or(usize::MAX))
}

/// `hours` 查询参数：缺失、非整数或非正数时取默认值
pub fn parse_hours(raw: Option<&str>, default: i64) -> i64 {
    parse_positive(raw).unwrap_or(default)
}

fn parse_positive(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|value| *value > 0)
}
