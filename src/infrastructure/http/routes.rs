//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping     GET   健康检查（不校验授权）
//! - /api/voices   GET   列出可用音色
//! - /api/tts      POST  合成音频（流式响应）

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;
use super::middleware::require_api_key;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes(state))
}

/// API 路由
fn api_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let guarded = Router::new()
        .route("/voices", get(handlers::list_voices))
        .route("/tts", post(handlers::synthesize))
        .layer(axum::middleware::from_fn_with_state(state, require_api_key));

    Router::new()
        .route("/ping", get(handlers::ping))
        .merge(guarded)
}
