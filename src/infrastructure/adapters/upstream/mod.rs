//! 上游平台适配器
//!
//! - HeaderForge: 七字段认证头伪造
//! - UpstreamClient: 音色目录与片段合成调用

mod client;
mod headers;

pub use client::{UpstreamClient, UpstreamClientConfig};
pub use headers::{AuthHeaderSet, HeaderForge};
