//! # Fleet Storage 模块
//!
//! KV 存储适配层：仓储层对后端的全部访问都经过 [`KvStore`]。
//!
//! ## 模块说明
//!
//! - [`traits`]：`KvStore` 接口（记录 / 计数器 / 集合 / 列表）
//! - [`keys`]：实体键约定（`{prefix}:{id}`、`{prefix}:all`、`{prefix}:next_id`）
//! - [`error`]：存储错误类型
//! - [`in_memory`]：内存实现，`RwLock<HashMap>`，用于本地降级与测试
//! - [`redis`]：Redis 实现，multiplexed 连接 + 调用超时
//!
//! ## 一致性
//!
//! 单个命令的原子性由后端保证（计数器自增原子）；跨键写入不做事务，
//! 由仓储层约定写入顺序并在读取时容忍残留。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use fleet_storage::{InMemoryKvStore, KvStore, keys};
//!
//! let store = InMemoryKvStore::new();
//! let id = store.increment(&keys::DEVICES.next_id()).await?;
//! store.add_to_set(&keys::DEVICES.all(), &id.to_string()).await?;
//! ```

pub mod error;
pub mod in_memory;
pub mod keys;
pub mod redis;
pub mod traits;

pub use error::*;
pub use in_memory::InMemoryKvStore;
pub use redis::RedisKvStore;
pub use traits::*;
