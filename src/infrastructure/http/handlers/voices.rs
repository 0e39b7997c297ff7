//! Voice HTTP Handlers

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::infrastructure::http::dto::{ApiResponse, VoiceItem, VoiceListResponse};
use crate::infrastructure::http::state::AppState;

/// 列出可用音色
pub async fn list_voices(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<VoiceListResponse>> {
    let mut voices: Vec<VoiceItem> = state
        .catalog
        .iter()
        .map(|(tag, info)| VoiceItem {
            tag: tag.clone(),
            name: info.name.clone(),
            icon_url: info.icon_url.clone(),
        })
        .collect();
    voices.sort_by(|a, b| a.tag.cmp(&b.tag));

    Json(ApiResponse::success(VoiceListResponse {
        total: voices.len(),
        voices,
    }))
}
