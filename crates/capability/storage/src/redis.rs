//! Redis KV 存储实现
//!
//! 启动时建立一条 multiplexed 连接，每次调用克隆使用；
//! 所有命令都带超时，超时映射为 StorageError。

use crate::error::StorageError;
use crate::traits::KvStore;
use redis::AsyncCommands;
use redis::RedisResult;
use redis::aio::MultiplexedConnection;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Redis KV 存储
pub struct RedisKvStore {
    connection: MultiplexedConnection,
    timeout: Duration,
}

impl RedisKvStore {
    /// 连接 Redis，连接本身同样受超时约束。
    pub async fn connect(redis_url: &str, timeout: Duration) -> Result<Self, StorageError> {
        let client = redis::Client::open(redis_url)?;
        let connection = tokio::time::timeout(timeout, client.get_multiplexed_tokio_connection())
            .await
            .map_err(|_| StorageError::new("store timeout: connect"))??;
        Ok(Self {
            connection,
            timeout,
        })
    }

    async fn run<T>(
        &self,
        op: &'static str,
        command: impl Future<Output = RedisResult<T>>,
    ) -> Result<T, StorageError> {
        match tokio::time::timeout(self.timeout, command).await {
            Ok(result) => result.map_err(StorageError::from),
            Err(_) => {
                warn!(
                    target: "fleet.storage",
                    op,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "store_timeout"
                );
                Err(StorageError::new(format!("store timeout: {op}")))
            }
        }
    }
}

#[async_trait::async_trait]
impl KvStore for RedisKvStore {
    async fn ping(&self) -> Result<(), StorageError> {
        let mut connection = self.connection.clone();
        let command = redis::cmd("PING");
        let _: String = self
            .run("ping", command.query_async(&mut connection))
            .await?;
        Ok(())
    }

    async fn get(&self, key: &str, field: &str) -> Result<Option<String>, StorageError> {
        let mut connection = self.connection.clone();
        self.run("hget", connection.hget(key, field)).await
    }

    async fn set(&self, key: &str, field: &str, value: &str) -> Result<(), StorageError> {
        let mut connection = self.connection.clone();
        self.run("hset", connection.hset::<_, _, _, ()>(key, field, value))
            .await
    }

    async fn increment(&self, counter: &str) -> Result<i64, StorageError> {
        let mut connection = self.connection.clone();
        self.run("incr", connection.incr(counter, 1_i64)).await
    }

    async fn add_to_set(&self, set: &str, member: &str) -> Result<(), StorageError> {
        let mut connection = self.connection.clone();
        self.run("sadd", connection.sadd::<_, _, ()>(set, member))
            .await
    }

    async fn remove_from_set(&self, set: &str, member: &str) -> Result<(), StorageError> {
        let mut connection = self.connection.clone();
        self.run("srem", connection.srem::<_, _, ()>(set, member))
            .await
    }

    async fn set_members(&self, set: &str) -> Result<Vec<String>, StorageError> {
        let mut connection = self.connection.clone();
        self.run("smembers", connection.smembers(set)).await
    }

    async fn set_cardinality(&self, set: &str) -> Result<u64, StorageError> {
        let mut connection = self.connection.clone();
        self.run("scard", connection.scard(set)).await
    }

    async fn list_push_front(&self, list: &str, value: &str) -> Result<(), StorageError> {
        let mut connection = self.connection.clone();
        self.run("lpush", connection.lpush::<_, _, ()>(list, value))
            .await
    }

    async fn list_range(
        &self,
        list: &str,
        start: i64,
        stop: i64,
    ) -> Result<Vec<String>, StorageError> {
        let mut connection = self.connection.clone();
        self.run(
            "lrange",
            connection.lrange(list, start as isize, stop as isize),
        )
        .await
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let mut connection = self.connection.clone();
        self.run("del", connection.del::<_, ()>(key)).await
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        let mut connection = self.connection.clone();
        self.run("exists", connection.exists(key)).await
    }
}
