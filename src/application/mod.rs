//! 应用层
//!
//! - Ports: 端口定义（DigestPort, TtsUpstreamPort）
//! - Synthesis: 分段拉取与流式聚合服务

pub mod error;
pub mod ports;
pub mod synthesis;

pub use error::SynthesisError;
pub use ports::{AudioStream, DigestPort, TtsUpstreamPort, UpstreamError};
pub use synthesis::{SynthesisConfig, SynthesisService, DEFAULT_CONCURRENCY};
