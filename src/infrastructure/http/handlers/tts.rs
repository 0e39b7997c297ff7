//! TTS HTTP Handlers

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::Response,
    Json,
};
use futures_util::StreamExt;

use crate::application::SynthesisError;
use crate::infrastructure::http::dto::SynthesizeRequest;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 合成音频
///
/// 响应体是惰性产生的 mp3 字节流；片段级失败只让输出变短，
/// 不会中断响应。
pub async fn synthesize(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SynthesizeRequest>,
) -> Result<Response, ApiError> {
    if !state.catalog.contains(&req.voice) {
        return Err(SynthesisError::UnknownVoice(req.voice).into());
    }

    let stream = state
        .synthesis
        .synthesize(&req.text, &req.voice, req.concurrency)?;

    tracing::info!(
        voice = %req.voice,
        text_chars = req.text.chars().count(),
        concurrency = ?req.concurrency,
        "Synthesis started"
    );

    let body = Body::from_stream(stream.map(Ok::<_, Infallible>));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "audio/mpeg")
        .body(body)
        .map_err(|e| ApiError::Internal(e.to_string()))
}
