//! 存储层错误类型
//!
//! 统一封装 KV 后端错误：
//! - 连接错误、命令执行错误
//! - 调用超时
//! - 键类型不匹配（WRONGTYPE）

#[derive(Debug)]
pub struct StorageError {
    message: String,
}

impl StorageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// 对已存在、但类型不同的键执行操作。
    pub fn wrong_type(key: &str) -> Self {
        Self::new(format!(
            "WRONGTYPE operation against key {key} holding the wrong kind of value"
        ))
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for StorageError {}

impl From<redis::RedisError> for StorageError {
    fn from(err: redis::RedisError) -> Self {
        Self::new(err.to_string())
    }
}
