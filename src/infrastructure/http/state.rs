//! Application State

use std::sync::Arc;

use crate::application::SynthesisService;
use crate::domain::VoiceCatalog;

/// 应用状态
///
/// 音色目录在启动阶段（或其兜底分支）写入一次，之后只读，
/// 无需额外锁。
pub struct AppState {
    /// 音色目录（启动后只读）
    pub catalog: Arc<VoiceCatalog>,
    /// 合成服务
    pub synthesis: SynthesisService,
    /// 静态授权 key，None 表示不校验
    pub api_key: Option<String>,
}

impl AppState {
    pub fn new(
        catalog: Arc<VoiceCatalog>,
        synthesis: SynthesisService,
        api_key: Option<String>,
    ) -> Self {
        Self { catalog, synthesis, api_key }
    }
}
