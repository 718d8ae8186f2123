//! 内存存储实现模块
//!
//! 用于本地开发（Redis 不可达时降级）和测试。
//!
//! 包含以下实现：
//! - KvStore: InMemoryKvStore

pub mod kv;

pub use kv::*;
