//! 车队监控 HTTP API
//!
//! - [`routes`]：路由表
//! - [`handlers`]：设备 / 遥测 / 告警 / 统计 / 系统接口
//! - [`middleware`]：请求上下文（request_id / trace_id / 指标）
//! - [`store`]：按配置选择存储后端
//! - [`utils`]：错误响应与输入校验

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod store;
pub mod utils;

use axum::Router;
use domain::Clock;
use fleet_repository::Repositories;
use fleet_seed::{SeedReport, Seeder};
use fleet_stats::StatsAggregator;
use fleet_storage::KvStore;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::warn;

/// 应用共享状态，请求间不保存可变状态。
#[derive(Clone)]
pub struct AppState {
    pub repositories: Repositories,
    pub stats: Arc<StatsAggregator>,
}

impl AppState {
    pub fn new(store: Arc<dyn KvStore>, clock: Arc<dyn Clock>) -> Self {
        let repositories = Repositories::new(store, clock);
        let stats = Arc::new(StatsAggregator::from_repositories(&repositories));
        Self {
            repositories,
            stats,
        }
    }
}

/// 组装完整应用：路由 + 状态 + 中间件。
pub fn build_app(state: AppState) -> Router {
    routes::create_api_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(middleware::request_context))
}

/// 装载样例数据；失败只记录日志，不阻止服务启动。
pub async fn seed_sample_data(
    store: Arc<dyn KvStore>,
    state: &AppState,
    clock: Arc<dyn Clock>,
    rng_seed: u64,
) -> Option<SeedReport> {
    let seeder = Seeder::new(store, state.repositories.clone(), clock, rng_seed);
    match seeder.run().await {
        Ok(report) => Some(report),
        Err(err) => {
            warn!(target: "fleet.seed", error = %err, "seed_failed");
            None
        }
    }
}
