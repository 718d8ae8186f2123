//! 设备模型
//!
//! - Device：设备记录
//! - DeviceStatus：设备状态（online / offline / warning / critical）
//! - NewDevice：创建输入
//! - DeviceUpdate：局部更新（仅应用出现的字段）

use crate::ParseEnumError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 设备状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Online,
    Offline,
    Warning,
    Critical,
}

impl DeviceStatus {
    pub const ALL: [DeviceStatus; 4] = [
        DeviceStatus::Online,
        DeviceStatus::Offline,
        DeviceStatus::Warning,
        DeviceStatus::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceStatus::Online => "online",
            DeviceStatus::Offline => "offline",
            DeviceStatus::Warning => "warning",
            DeviceStatus::Critical => "critical",
        }
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceStatus {
    type Err = ParseEnumError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        DeviceStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| ParseEnumError {
                kind: "status",
                value: value.to_string(),
            })
    }
}

/// 设备记录。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: String,
    pub location: String,
    pub status: DeviceStatus,
    pub registered_at: DateTime<Utc>,
}

/// 设备创建输入。
#[derive(Debug, Clone, PartialEq)]
pub struct NewDevice {
    pub name: String,
    pub device_type: String,
    pub location: String,
    pub status: DeviceStatus,
}

/// 设备局部更新，`None` 字段保持原值。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceUpdate {
    pub name: Option<String>,
    pub device_type: Option<String>,
    pub location: Option<String>,
    pub status: Option<DeviceStatus>,
}

impl DeviceUpdate {
    /// 仅更新状态。
    pub fn status(status: DeviceStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.device_type.is_none()
            && self.location.is_none()
            && self.status.is_none()
    }

    /// 将出现的字段写入设备；id 与 registered_at 不变。
    pub fn apply_to(self, device: &mut Device) {
        if let Some(name) = self.name {
            device.name = name;
        }
        if let Some(device_type) = self.device_type {
            device.device_type = device_type;
        }
        if let Some(location) = self.location {
            device.location = location;
        }
        if let Some(status) = self.status {
            device.status = status;
        }
    }
}
