//! 样例数据目录：6 台设备与 2 条告警。

use domain::{AlertSeverity, DeviceStatus};

/// 样例设备，`registered_hours_ago` 为相对装载时刻的注册时间。
#[derive(Debug, Clone, Copy)]
pub struct SampleDevice {
    pub name: &'static str,
    pub device_type: &'static str,
    pub location: &'static str,
    pub status: DeviceStatus,
    pub registered_hours_ago: i64,
}

/// 样例告警，`device_index` 指向 [`DEVICES`] 中的位置。
#[derive(Debug, Clone, Copy)]
pub struct SampleAlert {
    pub device_index: usize,
    pub alert_type: &'static str,
    pub message: &'static str,
    pub severity: AlertSeverity,
    pub created_minutes_ago: i64,
}

pub const DEVICES: [SampleDevice; 6] = [
    SampleDevice {
        name: "Temperature Sensor 01",
        device_type: "sensor",
        location: "Building A - Floor 2",
        status: DeviceStatus::Online,
        registered_hours_ago: 72,
    },
    SampleDevice {
        name: "Pressure Monitor 02",
        device_type: "monitor",
        location: "Building B - Floor 1",
        status: DeviceStatus::Online,
        registered_hours_ago: 48,
    },
    SampleDevice {
        name: "Flow Meter 03",
        device_type: "meter",
        location: "Building A - Basement",
        status: DeviceStatus::Warning,
        registered_hours_ago: 24,
    },
    SampleDevice {
        name: "Vibration Sensor 04",
        device_type: "sensor",
        location: "Building C - Floor 3",
        status: DeviceStatus::Offline,
        registered_hours_ago: 12,
    },
    SampleDevice {
        name: "Level Indicator 05",
        device_type: "indicator",
        location: "Building B - Floor 2",
        status: DeviceStatus::Critical,
        registered_hours_ago: 6,
    },
    SampleDevice {
        name: "Smart Gateway 06",
        device_type: "gateway",
        location: "Building A - Floor 1",
        status: DeviceStatus::Online,
        registered_hours_ago: 1,
    },
];

pub const ALERTS: [SampleAlert; 2] = [
    SampleAlert {
        device_index: 2,
        alert_type: "High Pressure",
        message: "Pressure reading exceeds normal threshold",
        severity: AlertSeverity::Warning,
        created_minutes_ago: 120,
    },
    SampleAlert {
        device_index: 5,
        alert_type: "System Failure",
        message: "Gateway connection lost",
        severity: AlertSeverity::Critical,
        created_minutes_ago: 30,
    },
];

/// 每台设备回填的遥测条数。
pub const READINGS_PER_DEVICE: usize = 72;

/// 相邻两条遥测的间隔（分钟）。
pub const READING_INTERVAL_MINUTES: i64 = 5;

pub const MEMORY_TOTAL: f64 = 8192.0;
