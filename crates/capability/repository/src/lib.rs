//! # Fleet Repository 模块
//!
//! 设备 / 遥测 / 告警仓储，基于 [`fleet_storage::KvStore`]。
//!
//! ## 模块说明
//!
//! - [`device`]：设备增删改查
//! - [`telemetry`]：遥测写入与按设备、按时间窗口查询
//! - [`alert`]：告警创建、过滤与确认
//! - [`error`]：仓储错误（校验 / 不存在 / 存储 / 编解码）
//!
//! ## 约定
//!
//! - ID 由 `{prefix}:next_id` 计数器分配，严格递增、从不复用
//! - 写入不做事务：先写记录再登记索引，读取时跳过缺失或损坏的记录
//! - 时间统一来自注入的 [`domain::Clock`]

pub mod alert;
pub mod device;
pub mod error;
mod record;
pub mod telemetry;
pub mod validation;

pub use alert::AlertRepository;
pub use device::DeviceRepository;
pub use error::RepositoryError;
pub use telemetry::TelemetryRepository;

use domain::Clock;
use fleet_storage::KvStore;
use std::sync::Arc;

/// 共享同一存储与时钟的仓储集合。
#[derive(Clone)]
pub struct Repositories {
    pub devices: Arc<DeviceRepository>,
    pub telemetry: Arc<TelemetryRepository>,
    pub alerts: Arc<AlertRepository>,
}

impl Repositories {
    pub fn new(store: Arc<dyn KvStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            devices: Arc::new(DeviceRepository::new(store.clone(), clock.clone())),
            telemetry: Arc::new(TelemetryRepository::new(store.clone(), clock.clone())),
            alerts: Arc::new(AlertRepository::new(store, clock)),
        }
    }
}
