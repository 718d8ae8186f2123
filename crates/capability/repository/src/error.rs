//! 仓储层错误类型。

use fleet_storage::StorageError;

/// 仓储操作错误。
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// 输入字段缺失或越界。
    #[error("{0}")]
    Validation(String),
    /// 引用的实体不存在（或记录无法解析）。
    #[error("{0}")]
    NotFound(String),
    /// 后端不可达或命令失败。
    #[error("store error: {0}")]
    Store(#[from] StorageError),
    /// 已存储的记录无法解析。
    #[error("decode error: {0}")]
    Decode(String),
    /// 实体无法序列化。
    #[error("encode error: {0}")]
    Encode(String),
}

impl RepositoryError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}
