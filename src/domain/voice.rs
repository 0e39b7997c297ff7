//! 音色目录
//!
//! 进程级共享的音色映射，启动时从上游平台加载一次，之后只读。
//! 加载失败或响应畸形时退化为单一兜底音色。

use std::collections::HashMap;

/// 兜底音色的 tag
const FALLBACK_VOICE_TAG: &str = "deepseek";

/// 兜底音色的显示名
const FALLBACK_VOICE_NAME: &str = "DeepSeek";

/// 音色描述信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceInfo {
    /// 显示名称
    pub name: String,
    /// 图标 URL（可能为空串）
    pub icon_url: String,
}

/// 音色目录
///
/// 以不透明的音色 tag 为键，键唯一。启动完成后不再变更。
#[derive(Debug, Clone, Default)]
pub struct VoiceCatalog {
    voices: HashMap<String, VoiceInfo>,
}

impl VoiceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 上游目录不可用时的兜底目录（单一合成条目）
    pub fn fallback() -> Self {
        let mut catalog = Self::new();
        catalog.insert(
            FALLBACK_VOICE_TAG.to_string(),
            VoiceInfo {
                name: FALLBACK_VOICE_NAME.to_string(),
                icon_url: String::new(),
            },
        );
        catalog
    }

    pub fn insert(&mut self, tag: String, info: VoiceInfo) {
        self.voices.insert(tag, info);
    }

    pub fn get(&self, tag: &str) -> Option<&VoiceInfo> {
        self.voices.get(tag)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.voices.contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &VoiceInfo)> {
        self.voices.iter()
    }
}
