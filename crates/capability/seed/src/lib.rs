//! # Fleet Seed 模块
//!
//! 首次启动时装载确定性的样例数据：
//! - 已有 `fleet:seeded` 标记：跳过
//! - 有 `fleet:seeding` 进度记录：上次装载中途失败，按进度续装
//! - 无任何标记但 `devices:next_id` 已存在（库中已有 API 写入的数据）：补写标记后跳过
//! - 否则写入进度记录，依次创建设备、回填遥测、创建告警，最后写入完成标记并删除进度
//!
//! 进度记录字段：`started_at`（装载基准时刻）、`device:{index}`、`alert:{index}`（已创建实体 ID）。
//! 遥测进度取设备列表长度，每台设备使用独立的随机数流，续装时跳过已写入的读数。
//!
//! 全部写入经由仓储的 `create_at`，与 API 创建共用同一写入路径与 ID 计数器。

pub mod catalog;

use catalog::{ALERTS, DEVICES, MEMORY_TOTAL, READING_INTERVAL_MINUTES, READINGS_PER_DEVICE};
use chrono::{DateTime, Duration, Utc};
use domain::{Clock, NewAlert, NewDevice, NewTelemetry};
use fleet_repository::{RepositoryError, Repositories};
use fleet_storage::KvStore;
use fleet_storage::keys::{
    DEVICES as DEVICE_KEYS, RECORD_FIELD, SEED_MARKER, SEED_PROGRESS, device_telemetry,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use tracing::info;

const STARTED_AT_FIELD: &str = "started_at";

/// 装载结果，计数为本次运行写入的实体数。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub seeded: bool,
    pub resumed: bool,
    pub devices: usize,
    pub telemetry: usize,
    pub alerts: usize,
}

/// 样例数据装载器
pub struct Seeder {
    store: Arc<dyn KvStore>,
    repositories: Repositories,
    clock: Arc<dyn Clock>,
    rng_seed: u64,
}

impl Seeder {
    pub fn new(
        store: Arc<dyn KvStore>,
        repositories: Repositories,
        clock: Arc<dyn Clock>,
        rng_seed: u64,
    ) -> Self {
        Self {
            store,
            repositories,
            clock,
            rng_seed,
        }
    }

    pub async fn run(&self) -> Result<SeedReport, RepositoryError> {
        if self.store.exists(SEED_MARKER).await? {
            info!(target: "fleet.seed", "seed_skipped_marker_present");
            return Ok(SeedReport::default());
        }
        let resumed = self.store.exists(SEED_PROGRESS).await?;
        if !resumed && self.store.exists(&DEVICE_KEYS.next_id()).await? {
            self.write_marker().await?;
            info!(target: "fleet.seed", "seed_skipped_store_in_use");
            return Ok(SeedReport::default());
        }
        if resumed {
            info!(target: "fleet.seed", "seed_resuming");
        }

        let now = self.started_at().await?;
        let mut report = SeedReport {
            seeded: true,
            resumed,
            ..SeedReport::default()
        };

        let mut device_ids = Vec::with_capacity(DEVICES.len());
        for (index, sample) in DEVICES.iter().enumerate() {
            let field = format!("device:{index}");
            if let Some(id) = self.progress(&field).await? {
                device_ids.push(id);
                continue;
            }
            let device = self
                .repositories
                .devices
                .create_at(
                    NewDevice {
                        name: sample.name.to_string(),
                        device_type: sample.device_type.to_string(),
                        location: sample.location.to_string(),
                        status: sample.status,
                    },
                    now - Duration::hours(sample.registered_hours_ago),
                )
                .await?;
            self.record_progress(&field, device.id).await?;
            device_ids.push(device.id);
            report.devices += 1;
        }

        for (index, device_id) in device_ids.iter().enumerate() {
            report.telemetry += self.backfill(index, *device_id, now).await?;
        }

        for (index, sample) in ALERTS.iter().enumerate() {
            let Some(device_id) = device_ids.get(sample.device_index) else {
                continue;
            };
            let field = format!("alert:{index}");
            if self.progress(&field).await?.is_some() {
                continue;
            }
            let alert = self
                .repositories
                .alerts
                .create_at(
                    NewAlert {
                        device_id: *device_id,
                        alert_type: sample.alert_type.to_string(),
                        message: sample.message.to_string(),
                        severity: sample.severity,
                    },
                    now - Duration::minutes(sample.created_minutes_ago),
                )
                .await?;
            self.record_progress(&field, alert.id).await?;
            report.alerts += 1;
        }

        self.write_marker().await?;
        self.store.delete(SEED_PROGRESS).await?;
        info!(
            target: "fleet.seed",
            resumed,
            devices = report.devices,
            telemetry = report.telemetry,
            alerts = report.alerts,
            "seed_completed"
        );
        Ok(report)
    }

    /// 按时间先后写入遥测，设备列表最终为最新在前；返回本次写入条数。
    async fn backfill(
        &self,
        index: usize,
        device_id: i64,
        now: DateTime<Utc>,
    ) -> Result<usize, RepositoryError> {
        let written = self
            .store
            .list_range(&device_telemetry(device_id), 0, -1)
            .await?
            .len();
        let mut rng = StdRng::seed_from_u64(self.rng_seed.wrapping_add(index as u64));
        let mut count = 0;
        for (position, step) in (0..READINGS_PER_DEVICE).rev().enumerate() {
            let reading = sample_reading(device_id, &mut rng);
            if position < written {
                continue;
            }
            let offset = Duration::minutes(READING_INTERVAL_MINUTES * step as i64);
            self.repositories
                .telemetry
                .create_at(reading, now - offset)
                .await?;
            count += 1;
        }
        Ok(count)
    }

    /// 装载基准时刻：续装时沿用首次记录的时刻，否则取当前时间并写入进度记录。
    async fn started_at(&self) -> Result<DateTime<Utc>, RepositoryError> {
        if let Some(raw) = self.store.get(SEED_PROGRESS, STARTED_AT_FIELD).await? {
            return DateTime::parse_from_rfc3339(&raw)
                .map(|at| at.with_timezone(&Utc))
                .map_err(|err| RepositoryError::Decode(format!("{SEED_PROGRESS}: {err}")));
        }
        let now = self.clock.now();
        self.store
            .set(SEED_PROGRESS, STARTED_AT_FIELD, &now.to_rfc3339())
            .await?;
        Ok(now)
    }

    async fn progress(&self, field: &str) -> Result<Option<i64>, RepositoryError> {
        let Some(raw) = self.store.get(SEED_PROGRESS, field).await? else {
            return Ok(None);
        };
        raw.parse()
            .map(Some)
            .map_err(|_| RepositoryError::Decode(format!("{SEED_PROGRESS} {field}: {raw}")))
    }

    async fn record_progress(&self, field: &str, id: i64) -> Result<(), RepositoryError> {
        self.store
            .set(SEED_PROGRESS, field, &id.to_string())
            .await?;
        Ok(())
    }

    async fn write_marker(&self) -> Result<(), RepositoryError> {
        let at = self.clock.now().to_rfc3339();
        self.store.set(SEED_MARKER, RECORD_FIELD, &at).await?;
        Ok(())
    }
}

fn sample_reading(device_id: i64, rng: &mut StdRng) -> NewTelemetry {
    NewTelemetry {
        device_id,
        battery_level: round1(rng.gen_range(20.0..90.0)),
        temperature: round1(rng.gen_range(15.0..40.0)),
        cpu_usage: round1(rng.gen_range(10.0..90.0)),
        memory_usage: rng.gen_range(1024.0..7168.0_f64).round(),
        memory_total: MEMORY_TOTAL,
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
