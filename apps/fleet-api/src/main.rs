//! 车队监控 API 服务入口。

use domain::SystemClock;
use fleet_api::{AppState, build_app, seed_sample_data, store::open_store};
use fleet_config::AppConfig;
use fleet_observability::init_tracing;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在），便于直接 cargo run 启动
    dotenvy::dotenv().ok();
    // 从环境变量加载运行配置
    let config = AppConfig::from_env()?;
    // 初始化结构化日志
    init_tracing();
    info!(
        target: "fleet.api",
        environment = %config.environment,
        store = %config.store_backend,
        "starting"
    );

    let store = open_store(&config).await?;
    let clock = Arc::new(SystemClock);
    let state = AppState::new(store.clone(), clock.clone());

    // 样例数据装载失败不影响启动
    if config.seed_enabled {
        seed_sample_data(store, &state, clock, config.seed_rng).await;
    }

    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(&config.http_addr).await?;
    info!(target: "fleet.api", addr = %config.http_addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
