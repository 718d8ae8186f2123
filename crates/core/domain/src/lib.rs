//! 车队监控领域模型：设备、遥测、告警与统计。
//!
//! 实体的 JSON 形态同时用于 HTTP 响应与 KV 存储记录（camelCase，时间为 RFC 3339）。

pub mod alert;
pub mod clock;
pub mod device;
pub mod stats;
pub mod telemetry;

pub use alert::{Alert, AlertSeverity, NewAlert};
pub use clock::{Clock, ManualClock, SystemClock};
pub use device::{Device, DeviceStatus, DeviceUpdate, NewDevice};
pub use stats::Stats;
pub use telemetry::{NewTelemetry, Telemetry};

/// 枚举字符串解析失败。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind}: {value}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}
