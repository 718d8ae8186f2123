//! 遥测仓储
//!
//! 键：`telemetry:{id}`、`telemetry:all`、`telemetry:next_id`，
//! 以及每个设备的 `device:{id}:telemetry` 列表（头部插入，最新在前）。
//!
//! 创建写入顺序：计数器自增 → 写记录 → 推入设备列表 → 加入集合。

use crate::error::RepositoryError;
use crate::record::{IdOrder, member_ids, parse_ids, read_many, read_record, write_record};
use crate::validation::{ensure_finite, ensure_non_negative, ensure_percent, require_id};
use chrono::{DateTime, TimeDelta, Utc};
use domain::{Clock, NewTelemetry, Telemetry};
use fleet_storage::KvStore;
use fleet_storage::keys::{TELEMETRY, device_telemetry};
use std::sync::Arc;
use tracing::{debug, warn};

/// 遥测仓储
pub struct TelemetryRepository {
    store: Arc<dyn KvStore>,
    clock: Arc<dyn Clock>,
}

impl TelemetryRepository {
    pub fn new(store: Arc<dyn KvStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// 最近的 `limit` 条遥测（按 ID 降序）。
    pub async fn list_all(&self, limit: usize) -> Result<Vec<Telemetry>, RepositoryError> {
        let ids = member_ids(self.store.as_ref(), TELEMETRY, IdOrder::Descending).await?;
        read_many(self.store.as_ref(), TELEMETRY, ids, limit).await
    }

    /// 设备最近的 `limit` 条遥测，最新在前。
    pub async fn list_by_device(
        &self,
        device_id: i64,
        limit: usize,
    ) -> Result<Vec<Telemetry>, RepositoryError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let stop = i64::try_from(limit).map_or(-1, |limit| limit - 1);
        let ids = self.device_ids(device_id, 0, stop).await?;
        read_many(self.store.as_ref(), TELEMETRY, ids, limit).await
    }

    /// 设备最新一条遥测；没有遥测时返回 `None`。
    pub async fn latest(&self, device_id: i64) -> Result<Option<Telemetry>, RepositoryError> {
        let ids = self.device_ids(device_id, 0, 0).await?;
        let Some(id) = ids.first() else {
            return Ok(None);
        };
        match read_record(self.store.as_ref(), &TELEMETRY.record(*id)).await {
            Ok(item) => Ok(item),
            Err(RepositoryError::Decode(reason)) => {
                warn!(target: "fleet.repository", device_id, telemetry_id = *id, reason = %reason, "latest_decode_failed");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// 设备最近 `hours` 小时内的遥测（时间戳严格晚于窗口起点），保持列表顺序。
    ///
    /// 读取设备的完整历史后过滤，开销与历史长度成正比。
    pub async fn for_period(
        &self,
        device_id: i64,
        hours: i64,
    ) -> Result<Vec<Telemetry>, RepositoryError> {
        let window = TimeDelta::try_hours(hours)
            .ok_or_else(|| RepositoryError::validation("hours out of range"))?;
        let since = self
            .clock
            .now()
            .checked_sub_signed(window)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let ids = self.device_ids(device_id, 0, -1).await?;
        let items: Vec<Telemetry> =
            read_many(self.store.as_ref(), TELEMETRY, ids, usize::MAX).await?;
        Ok(items
            .into_iter()
            .filter(|item| item.timestamp > since)
            .collect())
    }

    /// 写入一条遥测，时间戳取当前时间。
    pub async fn create(&self, input: NewTelemetry) -> Result<Telemetry, RepositoryError> {
        let timestamp = self.clock.now();
        self.create_at(input, timestamp).await
    }

    /// 以指定时间戳写入遥测（样例数据回填使用同一写入路径）。
    pub async fn create_at(
        &self,
        input: NewTelemetry,
        timestamp: DateTime<Utc>,
    ) -> Result<Telemetry, RepositoryError> {
        require_id(input.device_id, "deviceId")?;
        ensure_percent(input.battery_level, "batteryLevel")?;
        ensure_percent(input.cpu_usage, "cpuUsage")?;
        ensure_non_negative(input.memory_usage, "memoryUsage")?;
        ensure_non_negative(input.memory_total, "memoryTotal")?;
        ensure_finite(input.temperature, "temperature")?;

        let id = self.store.increment(&TELEMETRY.next_id()).await?;
        let telemetry = Telemetry {
            id,
            device_id: input.device_id,
            battery_level: input.battery_level,
            temperature: input.temperature,
            cpu_usage: input.cpu_usage,
            memory_usage: input.memory_usage,
            memory_total: input.memory_total,
            timestamp,
        };
        let member = id.to_string();
        write_record(self.store.as_ref(), &TELEMETRY.record(id), &telemetry).await?;
        self.store
            .list_push_front(&device_telemetry(input.device_id), &member)
            .await?;
        self.store.add_to_set(&TELEMETRY.all(), &member).await?;
        debug!(
            target: "fleet.repository",
            telemetry_id = id,
            device_id = input.device_id,
            "telemetry_created"
        );
        Ok(telemetry)
    }

    async fn device_ids(
        &self,
        device_id: i64,
        start: i64,
        stop: i64,
    ) -> Result<Vec<i64>, RepositoryError> {
        let list = device_telemetry(device_id);
        let members = self.store.list_range(&list, start, stop).await?;
        Ok(parse_ids(&list, members))
    }
}
