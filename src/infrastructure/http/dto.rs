//! Data Transfer Objects

use serde::{Deserialize, Serialize};

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

// ============================================================================
// TTS DTOs
// ============================================================================

/// 合成请求
#[derive(Debug, Deserialize)]
pub struct SynthesizeRequest {
    pub text: String,
    pub voice: String,
    /// 覆盖默认并发度（可选）
    pub concurrency: Option<usize>,
}

// ============================================================================
// Voice DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct VoiceItem {
    pub tag: String,
    pub name: String,
    pub icon_url: String,
}

#[derive(Debug, Serialize)]
pub struct VoiceListResponse {
    pub total: usize,
    pub voices: Vec<VoiceItem>,
}
