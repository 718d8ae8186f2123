//! 设备仓储
//!
//! 键：`devices:{id}`（记录）、`devices:all`（存活 ID）、`devices:next_id`（计数器）。
//!
//! 写入顺序：
//! - 创建：计数器自增 → 写记录 → 加入集合
//! - 删除：移出集合 → 删除记录（不级联遥测与告警）

use crate::error::RepositoryError;
use crate::record::{IdOrder, member_ids, read_many, read_record, write_record};
use crate::validation::require_text;
use chrono::{DateTime, Utc};
use domain::{Clock, Device, DeviceStatus, DeviceUpdate, NewDevice};
use fleet_storage::KvStore;
use fleet_storage::keys::DEVICES;
use std::sync::Arc;
use tracing::{info, warn};

/// 设备仓储
pub struct DeviceRepository {
    store: Arc<dyn KvStore>,
    clock: Arc<dyn Clock>,
}

impl DeviceRepository {
    pub fn new(store: Arc<dyn KvStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// 列出全部设备（按 ID 升序），跳过缺失或损坏的记录。
    pub async fn list_all(&self) -> Result<Vec<Device>, RepositoryError> {
        let ids = member_ids(self.store.as_ref(), DEVICES, IdOrder::Ascending).await?;
        read_many(self.store.as_ref(), DEVICES, ids, usize::MAX).await
    }

    /// 设备集合基数。
    pub async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(self.store.set_cardinality(&DEVICES.all()).await?)
    }

    /// 查找设备；记录不存在或无法解析均视为不存在。
    pub async fn get_by_id(&self, id: i64) -> Result<Device, RepositoryError> {
        let key = DEVICES.record(id);
        match read_record::<Device>(self.store.as_ref(), &key).await {
            Ok(Some(device)) => Ok(device),
            Ok(None) => Err(device_not_found(id)),
            Err(RepositoryError::Decode(reason)) => {
                warn!(target: "fleet.repository", device_id = id, reason = %reason, "device_decode_failed");
                Err(device_not_found(id))
            }
            Err(err) => Err(err),
        }
    }

    /// 注册新设备，registeredAt 取当前时间。
    pub async fn create(&self, input: NewDevice) -> Result<Device, RepositoryError> {
        let registered_at = self.clock.now();
        self.create_at(input, registered_at).await
    }

    /// 以指定注册时间创建设备（样例数据回填使用同一写入路径）。
    pub async fn create_at(
        &self,
        input: NewDevice,
        registered_at: DateTime<Utc>,
    ) -> Result<Device, RepositoryError> {
        require_text(&input.name, "name")?;
        require_text(&input.device_type, "type")?;
        require_text(&input.location, "location")?;

        let id = self.store.increment(&DEVICES.next_id()).await?;
        let device = Device {
            id,
            name: input.name,
            device_type: input.device_type,
            location: input.location,
            status: input.status,
            registered_at,
        };
        write_record(self.store.as_ref(), &DEVICES.record(id), &device).await?;
        self.store
            .add_to_set(&DEVICES.all(), &id.to_string())
            .await?;
        info!(
            target: "fleet.repository",
            device_id = id,
            status = %device.status,
            "device_created"
        );
        Ok(device)
    }

    /// 局部更新：仅应用出现的字段，registeredAt 不变。
    pub async fn update(&self, id: i64, update: DeviceUpdate) -> Result<Device, RepositoryError> {
        if let Some(name) = update.name.as_deref() {
            require_text(name, "name")?;
        }
        if let Some(device_type) = update.device_type.as_deref() {
            require_text(device_type, "type")?;
        }
        if let Some(location) = update.location.as_deref() {
            require_text(location, "location")?;
        }

        let mut device = self.get_by_id(id).await?;
        update.apply_to(&mut device);
        write_record(self.store.as_ref(), &DEVICES.record(id), &device).await?;
        info!(target: "fleet.repository", device_id = id, "device_updated");
        Ok(device)
    }

    /// 仅更新状态。
    pub async fn update_status(
        &self,
        id: i64,
        status: DeviceStatus,
    ) -> Result<Device, RepositoryError> {
        self.update(id, DeviceUpdate::status(status)).await
    }

    /// 删除设备记录与集合成员；设备不存在时无操作。
    pub async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        self.store
            .remove_from_set(&DEVICES.all(), &id.to_string())
            .await?;
        self.store.delete(&DEVICES.record(id)).await?;
        info!(target: "fleet.repository", device_id = id, "device_deleted");
        Ok(())
    }
}

fn device_not_found(id: i64) -> RepositoryError {
    RepositoryError::not_found(format!("device {id} not found"))
}
