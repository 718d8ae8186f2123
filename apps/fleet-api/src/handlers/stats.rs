//! 统计 handler
//!
//! - GET /api/stats - 车队统计（每次请求全量重算）

use crate::AppState;
use crate::utils::response::{ok, repository_error};
use axum::{extract::State, response::Response};

pub async fn get_stats(State(state): State<AppState>) -> Response {
    match state.stats.compute().await {
        Ok(stats) => ok(stats),
        Err(err) => repository_error(err),
    }
}
