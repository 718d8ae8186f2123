//! 车队统计聚合
//!
//! 每次请求全量重算，不做缓存：
//! - totalDevices：设备集合基数
//! - onlineDevices：可解析设备中 status = online 的数量
//! - activeAlerts / criticalAlerts：未确认告警（及其中 critical 级别）数量
//! - dataPoints / avgCpuUsage：可解析遥测条数与 CPU 使用率均值（无遥测时为 0）
//!
//! 每一轮扫描都跳过无法解析的记录。

use domain::{AlertSeverity, DeviceStatus, Stats};
use fleet_repository::{AlertRepository, DeviceRepository, RepositoryError, TelemetryRepository};
use std::sync::Arc;
use tracing::debug;

/// 统计聚合器
pub struct StatsAggregator {
    devices: Arc<DeviceRepository>,
    telemetry: Arc<TelemetryRepository>,
    alerts: Arc<AlertRepository>,
}

impl StatsAggregator {
    pub fn new(
        devices: Arc<DeviceRepository>,
        telemetry: Arc<TelemetryRepository>,
        alerts: Arc<AlertRepository>,
    ) -> Self {
        Self {
            devices,
            telemetry,
            alerts,
        }
    }

    pub fn from_repositories(repositories: &fleet_repository::Repositories) -> Self {
        Self::new(
            repositories.devices.clone(),
            repositories.telemetry.clone(),
            repositories.alerts.clone(),
        )
    }

    pub async fn compute(&self) -> Result<Stats, RepositoryError> {
        let total_devices = self.devices.count().await?;

        let online_devices = self
            .devices
            .list_all()
            .await?
            .iter()
            .filter(|device| device.status == DeviceStatus::Online)
            .count() as u64;

        let active = self.alerts.list_unacknowledged().await?;
        let active_alerts = active.len() as u64;
        let critical_alerts = active
            .iter()
            .filter(|alert| alert.severity == AlertSeverity::Critical)
            .count() as u64;

        let readings = self.telemetry.list_all(usize::MAX).await?;
        let data_points = readings.len() as u64;
        let avg_cpu_usage = mean(readings.iter().map(|item| item.cpu_usage));

        debug!(
            target: "fleet.stats",
            total_devices,
            online_devices,
            active_alerts,
            data_points,
            "stats_computed"
        );
        Ok(Stats {
            total_devices,
            online_devices,
            active_alerts,
            critical_alerts,
            data_points,
            avg_cpu_usage,
        })
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0_u64), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        return 0.0;
    }
    sum / count as f64
}

#[cfg(test)]
mod tests {
    use super::mean;

    #[test]
    fn mean_of_nothing_is_zero() {
        assert_eq!(mean(std::iter::empty()), 0.0);
        assert_eq!(mean([10.0, 20.0, 60.0].into_iter()), 30.0);
    }
}
