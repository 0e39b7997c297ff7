//! 应用层错误定义

use thiserror::Error;

/// 合成入口错误
///
/// 调用方输入问题直接向上暴露；片段级的上游失败不会出现在这里，
/// 它们在流生产过程中被记录并跳过。
#[derive(Debug, Error)]
pub enum SynthesisError {
    /// 未提供有效文本
    #[error("Text is empty")]
    EmptyText,

    /// 音色不存在
    #[error("Voice not found: {0}")]
    UnknownVoice(String),
}
