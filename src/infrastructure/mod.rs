//! 基础设施层
//!
//! - Adapters: 熵源、摘要、上游客户端
//! - HTTP: 对外服务接口

pub mod adapters;
pub mod http;
