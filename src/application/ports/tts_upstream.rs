//! TTS Upstream Port - 上游语音平台抽象
//!
//! 定义对远端 TTS 平台的两类调用：音色目录拉取与单片段音频合成。
//! 具体实现在 infrastructure/adapters/upstream 层。

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::Stream;
use thiserror::Error;

use crate::domain::VoiceCatalog;

/// 上游调用错误
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 增量到达的音频字节流
pub type AudioStream = Pin<Box<dyn Stream<Item = Result<Bytes, UpstreamError>> + Send>>;

/// TTS Upstream Port
#[async_trait]
pub trait TtsUpstreamPort: Send + Sync {
    /// 拉取音色目录
    ///
    /// 响应畸形或不可达时返回错误，由调用方决定兜底策略。
    async fn fetch_voice_list(&self) -> Result<VoiceCatalog, UpstreamError>;

    /// 对单个文本片段发起合成请求，返回增量音频流
    ///
    /// 非 2xx 状态对该次调用是硬失败。
    async fn fetch_audio(&self, text: &str, voice: &str) -> Result<AudioStream, UpstreamError>;
}
