//! HTTP 基础设施
//!
//! 薄路由层：健康检查、音色列表、流式合成端点，外加授权校验
//! 与 CORS。核心逻辑都在 domain / application 层。

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use server::{HttpServer, ServerConfig};
pub use state::AppState;
