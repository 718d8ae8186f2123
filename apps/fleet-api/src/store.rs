//! 存储后端选择
//!
//! - memory：直接使用内存存储
//! - redis：连接并 PING，失败即启动失败
//! - auto：同 redis，失败时降级为内存存储（记 warn 与指标）

use fleet_config::{AppConfig, StoreBackend};
use fleet_observability::metrics;
use fleet_storage::{InMemoryKvStore, KvStore, RedisKvStore, StorageError};
use std::sync::Arc;
use tracing::{info, warn};

/// 按配置打开存储。
pub async fn open_store(config: &AppConfig) -> Result<Arc<dyn KvStore>, StorageError> {
    match config.store_backend {
        StoreBackend::Memory => {
            info!(target: "fleet.storage", backend = "memory", "store_selected");
            Ok(Arc::new(InMemoryKvStore::new()))
        }
        StoreBackend::Redis => {
            let store = connect_redis(config).await?;
            info!(target: "fleet.storage", backend = "redis", "store_selected");
            Ok(store)
        }
        StoreBackend::Auto => match connect_redis(config).await {
            Ok(store) => {
                info!(target: "fleet.storage", backend = "redis", "store_selected");
                Ok(store)
            }
            Err(err) => {
                warn!(
                    target: "fleet.storage",
                    error = %err,
                    "store_fallback_memory"
                );
                metrics().record_store_fallback();
                Ok(Arc::new(InMemoryKvStore::new()))
            }
        },
    }
}

async fn connect_redis(config: &AppConfig) -> Result<Arc<dyn KvStore>, StorageError> {
    let store = RedisKvStore::connect(&config.redis_url, config.store_timeout).await?;
    store.ping().await?;
    Ok(Arc::new(store))
}
