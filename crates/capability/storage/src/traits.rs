//! KV 存储适配接口
//!
//! 仓储层只通过 `KvStore` 访问后端，后端被视为黑盒：
//! - 记录：`key` → `field` → 值（类 Redis hash）
//! - 计数器：原子自增，用于 ID 分配
//! - 集合：成员索引（无序）
//! - 列表：头部插入，按下标区间读取
//!
//! 设计原则：
//! - 所有方法均可能因后端故障返回 StorageError，调用方必须向上传播
//! - 删除不存在的键不是错误
//! - 使用 async_trait 支持动态分发（Redis / 内存实现可互换）

use crate::error::StorageError;
use async_trait::async_trait;

/// KV 存储适配接口。
#[async_trait]
pub trait KvStore: Send + Sync {
    /// 探测后端是否可用。
    async fn ping(&self) -> Result<(), StorageError>;

    /// 读取记录字段，键或字段不存在时返回 `None`。
    async fn get(&self, key: &str, field: &str) -> Result<Option<String>, StorageError>;

    /// 写入记录字段（覆盖）。
    async fn set(&self, key: &str, field: &str, value: &str) -> Result<(), StorageError>;

    /// 计数器加一并返回新值，不存在时从 0 开始。
    async fn increment(&self, counter: &str) -> Result<i64, StorageError>;

    /// 向集合添加成员。
    async fn add_to_set(&self, set: &str, member: &str) -> Result<(), StorageError>;

    /// 从集合移除成员，成员不存在时无操作。
    async fn remove_from_set(&self, set: &str, member: &str) -> Result<(), StorageError>;

    /// 集合全部成员（顺序不保证）。
    async fn set_members(&self, set: &str) -> Result<Vec<String>, StorageError>;

    /// 集合成员数量。
    async fn set_cardinality(&self, set: &str) -> Result<u64, StorageError>;

    /// 在列表头部插入。
    async fn list_push_front(&self, list: &str, value: &str) -> Result<(), StorageError>;

    /// 读取列表区间 `[start, stop]`（闭区间，负数表示从尾部倒数）。
    async fn list_range(
        &self,
        list: &str,
        start: i64,
        stop: i64,
    ) -> Result<Vec<String>, StorageError>;

    /// 删除任意类型的键。
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// 键是否存在（任意类型）。
    async fn exists(&self, key: &str) -> Result<bool, StorageError>;
}
