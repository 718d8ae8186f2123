//! 车队统计（派生数据，不落库）。

use serde::{Deserialize, Serialize};

/// 每次请求全量重算的车队统计。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_devices: u64,
    pub online_devices: u64,
    pub active_alerts: u64,
    pub critical_alerts: u64,
    pub data_points: u64,
    pub avg_cpu_usage: f64,
}
