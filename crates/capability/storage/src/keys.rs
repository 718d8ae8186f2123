//! 键约定
//!
//! 每类实体使用三类键：
//! - `{prefix}:{id}`：实体记录，JSON 存放在 `data` 字段
//! - `{prefix}:all`：存活 ID 集合
//! - `{prefix}:next_id`：ID 计数器
//!
//! 遥测额外维护 `device:{id}:telemetry` 列表（新数据在头部）。
//! 前缀与既有部署保持一致（`devices`、`telemetry`、`alerts`）。

/// 实体 JSON 所在的记录字段。
pub const RECORD_FIELD: &str = "data";

/// 样例数据装载完成标记。
pub const SEED_MARKER: &str = "fleet:seeded";

/// 样例数据装载进度（装载中途失败时保留，用于下次启动续装）。
pub const SEED_PROGRESS: &str = "fleet:seeding";

/// 某类实体的键集合。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityKeys {
    prefix: &'static str,
}

pub const DEVICES: EntityKeys = EntityKeys::new("devices");
pub const TELEMETRY: EntityKeys = EntityKeys::new("telemetry");
pub const ALERTS: EntityKeys = EntityKeys::new("alerts");

impl EntityKeys {
    pub const fn new(prefix: &'static str) -> Self {
        Self { prefix }
    }

    pub fn prefix(&self) -> &'static str {
        self.prefix
    }

    pub fn record(&self, id: i64) -> String {
        format!("{}:{}", self.prefix, id)
    }

    pub fn all(&self) -> String {
        format!("{}:all", self.prefix)
    }

    pub fn next_id(&self) -> String {
        format!("{}:next_id", self.prefix)
    }
}

/// 设备遥测 ID 列表（新数据在头部）。
pub fn device_telemetry(device_id: i64) -> String {
    format!("device:{}:telemetry", device_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_follow_layout() {
        assert_eq!(DEVICES.record(7), "devices:7");
        assert_eq!(DEVICES.all(), "devices:all");
        assert_eq!(TELEMETRY.next_id(), "telemetry:next_id");
        assert_eq!(ALERTS.record(2), "alerts:2");
        assert_eq!(device_telemetry(3), "device:3:telemetry");
    }
}
