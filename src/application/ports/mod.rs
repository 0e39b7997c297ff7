//! Ports - 应用层端口定义
//!
//! 摘要原语与上游平台的抽象接口，具体实现在 infrastructure 层。

mod digest;
mod tts_upstream;

pub use digest::DigestPort;
pub use tts_upstream::{AudioStream, TtsUpstreamPort, UpstreamError};
