//! 应用运行配置加载。
//!
//! 全部配置来自环境变量（启动时可由 `.env` 预先注入），空字符串视同未设置。

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 存储后端选择。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// 优先 Redis，不可达时降级为内存存储。
    Auto,
    /// 必须使用 Redis，不可达时启动失败。
    Redis,
    Memory,
}

impl StoreBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Auto => "auto",
            StoreBackend::Redis => "redis",
            StoreBackend::Memory => "memory",
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreBackend {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "auto" => Ok(StoreBackend::Auto),
            "redis" => Ok(StoreBackend::Redis),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(()),
        }
    }
}

/// 应用运行配置。
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http_addr: String,
    pub redis_url: String,
    pub store_backend: StoreBackend,
    pub store_timeout: Duration,
    pub seed_enabled: bool,
    pub seed_rng: u64,
    pub environment: String,
}

impl AppConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 从任意键值来源读取配置（`from_env` 的底层实现）。
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars { lookup };

        let http_addr = match (vars.optional("FLEET_HTTP_ADDR"), vars.optional("PORT")) {
            (Some(addr), _) => addr,
            (None, Some(port)) => {
                let port = port
                    .parse::<u16>()
                    .map_err(|_| ConfigError::Invalid("PORT".to_string(), port))?;
                format!("0.0.0.0:{port}")
            }
            (None, None) => "127.0.0.1:5000".to_string(),
        };
        let redis_url = match vars.optional("REDIS_URL") {
            Some(url) => url,
            None => redis_url_from_parts(&vars)?,
        };
        let store_backend = vars.parsed_with_default("FLEET_STORE", StoreBackend::Auto)?;
        let timeout_ms = vars.parsed_with_default("FLEET_STORE_TIMEOUT_MS", 2000_u64)?;
        if timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "FLEET_STORE_TIMEOUT_MS".to_string(),
                "0".to_string(),
            ));
        }
        let seed_enabled = vars.bool_with_default("FLEET_SEED", true);
        let seed_rng = vars.parsed_with_default("FLEET_SEED_RNG", 42_u64)?;
        let environment = vars
            .optional("FLEET_ENV")
            .unwrap_or_else(|| "development".to_string());

        Ok(Self {
            http_addr,
            redis_url,
            store_backend,
            store_timeout: Duration::from_millis(timeout_ms),
            seed_enabled,
            seed_rng,
            environment,
        })
    }
}

/// 由 REDIS_HOST / REDIS_PORT / REDIS_PASSWORD / REDIS_DB 组装连接串。
fn redis_url_from_parts<F>(vars: &Vars<F>) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let host = vars
        .optional("REDIS_HOST")
        .unwrap_or_else(|| "localhost".to_string());
    let port = vars.parsed_with_default("REDIS_PORT", 6379_u16)?;
    let db = vars.parsed_with_default("REDIS_DB", 0_u32)?;
    Ok(match vars.optional("REDIS_PASSWORD") {
        Some(password) => format!("redis://:{password}@{host}:{port}/{db}"),
        None => format!("redis://{host}:{port}/{db}"),
    })
}

struct Vars<F> {
    lookup: F,
}

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn optional(&self, key: &str) -> Option<String> {
        match (self.lookup)(key) {
            Some(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
            _ => None,
        }
    }

    fn parsed_with_default<T: FromStr>(&self, key: &str, default: T) -> Result<T, ConfigError> {
        let value = match self.optional(key) {
            Some(value) => value,
            None => return Ok(default),
        };
        value
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid(key.to_string(), value))
    }

    fn bool_with_default(&self, key: &str, default: bool) -> bool {
        match self.optional(key) {
            Some(value) => matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "on"),
            None => default,
        }
    }
}
