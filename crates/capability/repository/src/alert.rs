//! 告警仓储
//!
//! 键：`alerts:{id}`、`alerts:all`、`alerts:next_id`。
//! 按设备 / 未确认过滤均为全量扫描；结果按 ID 降序（最新在前）。

use crate::error::RepositoryError;
use crate::record::{IdOrder, member_ids, read_many, read_record, write_record};
use crate::validation::{require_id, require_text};
use chrono::{DateTime, Utc};
use domain::{Alert, Clock, NewAlert};
use fleet_storage::KvStore;
use fleet_storage::keys::ALERTS;
use std::sync::Arc;
use tracing::{info, warn};

/// 告警仓储
pub struct AlertRepository {
    store: Arc<dyn KvStore>,
    clock: Arc<dyn Clock>,
}

impl AlertRepository {
    pub fn new(store: Arc<dyn KvStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// 最近的 `limit` 条告警。
    pub async fn list_all(&self, limit: usize) -> Result<Vec<Alert>, RepositoryError> {
        let ids = member_ids(self.store.as_ref(), ALERTS, IdOrder::Descending).await?;
        read_many(self.store.as_ref(), ALERTS, ids, limit).await
    }

    /// 指定设备的全部告警。
    pub async fn list_by_device(&self, device_id: i64) -> Result<Vec<Alert>, RepositoryError> {
        let alerts = self.list_all(usize::MAX).await?;
        Ok(alerts
            .into_iter()
            .filter(|alert| alert.device_id == device_id)
            .collect())
    }

    /// 全部未确认告警。
    pub async fn list_unacknowledged(&self) -> Result<Vec<Alert>, RepositoryError> {
        let alerts = self.list_all(usize::MAX).await?;
        Ok(alerts
            .into_iter()
            .filter(|alert| !alert.acknowledged)
            .collect())
    }

    /// 创建告警，createdAt 取当前时间，初始为未确认。
    pub async fn create(&self, input: NewAlert) -> Result<Alert, RepositoryError> {
        let created_at = self.clock.now();
        self.create_at(input, created_at).await
    }

    /// 以指定创建时间写入告警（样例数据回填使用同一写入路径）。
    pub async fn create_at(
        &self,
        input: NewAlert,
        created_at: DateTime<Utc>,
    ) -> Result<Alert, RepositoryError> {
        require_id(input.device_id, "deviceId")?;
        require_text(&input.alert_type, "type")?;
        require_text(&input.message, "message")?;

        let id = self.store.increment(&ALERTS.next_id()).await?;
        let alert = Alert {
            id,
            device_id: input.device_id,
            alert_type: input.alert_type,
            message: input.message,
            severity: input.severity,
            acknowledged: false,
            created_at,
        };
        write_record(self.store.as_ref(), &ALERTS.record(id), &alert).await?;
        self.store.add_to_set(&ALERTS.all(), &id.to_string()).await?;
        info!(
            target: "fleet.repository",
            alert_id = id,
            device_id = alert.device_id,
            severity = %alert.severity,
            "alert_created"
        );
        Ok(alert)
    }

    /// 确认告警；已确认时直接返回（幂等）。
    pub async fn acknowledge(&self, id: i64) -> Result<Alert, RepositoryError> {
        let key = ALERTS.record(id);
        let mut alert = match read_record::<Alert>(self.store.as_ref(), &key).await {
            Ok(Some(alert)) => alert,
            Ok(None) => return Err(alert_not_found(id)),
            Err(RepositoryError::Decode(reason)) => {
                warn!(target: "fleet.repository", alert_id = id, reason = %reason, "alert_decode_failed");
                return Err(alert_not_found(id));
            }
            Err(err) => return Err(err),
        };
        if alert.acknowledged {
            return Ok(alert);
        }
        alert.acknowledged = true;
        write_record(self.store.as_ref(), &key, &alert).await?;
        info!(target: "fleet.repository", alert_id = id, "alert_acknowledged");
        Ok(alert)
    }
}

fn alert_not_found(id: i64) -> RepositoryError {
    RepositoryError::not_found(format!("alert {id} not found"))
}
