//! 遥测读数模型。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 单条遥测读数，归属于一个设备。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Telemetry {
    pub id: i64,
    pub device_id: i64,
    pub battery_level: f64,
    pub temperature: f64,
    pub cpu_usage: f64,
    pub memory_usage: f64,
    pub memory_total: f64,
    pub timestamp: DateTime<Utc>,
}

/// 遥测创建输入。
#[derive(Debug, Clone, PartialEq)]
pub struct NewTelemetry {
    pub device_id: i64,
    pub battery_level: f64,
    pub temperature: f64,
    pub cpu_usage: f64,
    pub memory_usage: f64,
    pub memory_total: f64,
}
