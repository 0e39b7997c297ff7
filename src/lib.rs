//! Zmgate - 浏览器身份伪装 TTS 网关
//!
//! 以伪造的浏览器客户端身份调用远端语音平台，把长文本合成能力
//! 重新暴露为简化的请求/响应契约。
//!
//! 领域层 (domain/):
//! - hash: 32 位有符号整数哈希（与网页端逐位一致）
//! - fingerprint: 设备指纹与会话标识合成
//! - segmenter: 两级分隔符文本分割
//! - voice: 音色目录
//!
//! 应用层 (application/):
//! - Ports: 端口定义（DigestPort, TtsUpstreamPort）
//! - Synthesis: 分段拉取与有序流式聚合
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: 系统熵源、MD5 摘要、请求头伪造、上游客户端
//! - HTTP: 薄路由层（健康检查、音色列表、流式合成）

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
