//! 上游 TTS 平台客户端
//!
//! 实现 TtsUpstreamPort trait，以伪造的浏览器身份调用远端语音平台。
//!
//! 上游 API:
//! - GET  {base_url}/api/robot/platform           音色目录
//! - POST {base_url}/api/tts/v1?roleid=<voice>    单片段合成（流式响应）

use std::time::Duration;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;

use super::headers::HeaderForge;
use crate::application::ports::{AudioStream, TtsUpstreamPort, UpstreamError};
use crate::domain::{VoiceCatalog, VoiceInfo};

/// 音色目录响应（字段全部可缺省，畸形数据走兜底）
#[derive(Debug, Deserialize)]
struct PlatformResponse {
    data: Option<PlatformData>,
}

#[derive(Debug, Deserialize)]
struct PlatformData {
    #[serde(default)]
    list: Vec<PlatformVoice>,
}

#[derive(Debug, Deserialize)]
struct PlatformVoice {
    tag: Option<String>,
    title: Option<String>,
    icon: Option<String>,
}

/// 上游客户端配置
#[derive(Debug, Clone)]
pub struct UpstreamClientConfig {
    /// 上游平台基础 URL
    pub base_url: String,
    /// 单次请求超时时间（秒），超时只影响该片段
    pub timeout_secs: u64,
}

impl Default for UpstreamClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.zmvoice.com".to_string(),
            timeout_secs: 30,
        }
    }
}

impl UpstreamClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// 上游 TTS 平台客户端
pub struct UpstreamClient {
    client: Client,
    config: UpstreamClientConfig,
    forge: HeaderForge,
}

impl UpstreamClient {
    pub fn new(config: UpstreamClientConfig, forge: HeaderForge) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| UpstreamError::NetworkError(e.to_string()))?;

        Ok(Self { client, config, forge })
    }

    fn platform_url(&self) -> String {
        format!("{}/api/robot/platform", self.config.base_url)
    }

    fn tts_url(&self, voice: &str) -> String {
        format!(
            "{}/api/tts/v1?roleid={}",
            self.config.base_url,
            urlencoding::encode(voice)
        )
    }

    /// 为请求附加新鲜伪造的认证头（每次调用全部重新生成）
    async fn with_forged_headers(&self, mut request: RequestBuilder) -> RequestBuilder {
        let headers = self.forge.build_headers().await;
        for (name, value) in headers.as_pairs() {
            request = request.header(name, value);
        }
        request
    }
}

/// reqwest 错误归类
fn classify(e: reqwest::Error) -> UpstreamError {
    if e.is_timeout() {
        UpstreamError::Timeout
    } else if e.is_connect() {
        UpstreamError::NetworkError(format!("Cannot connect to upstream: {}", e))
    } else {
        UpstreamError::NetworkError(e.to_string())
    }
}

#[async_trait]
impl TtsUpstreamPort for UpstreamClient {
    async fn fetch_voice_list(&self) -> Result<VoiceCatalog, UpstreamError> {
        tracing::debug!(url = %self.platform_url(), "Fetching voice catalog");

        let request = self.client.get(self.platform_url());
        let response = self
            .with_forged_headers(request)
            .await
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::ServiceError(format!("HTTP {}", status)));
        }

        let body: PlatformResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::InvalidResponse(e.to_string()))?;

        let data = body
            .data
            .ok_or_else(|| UpstreamError::InvalidResponse("missing data field".to_string()))?;

        let mut catalog = VoiceCatalog::new();
        for entry in data.list {
            let Some(tag) = entry.tag else {
                continue;
            };
            let name = entry
                .title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| tag.clone());
            let icon_url = entry.icon.unwrap_or_default();
            catalog.insert(tag, VoiceInfo { name, icon_url });
        }

        tracing::info!(voices = catalog.len(), "Voice catalog fetched");
        Ok(catalog)
    }

    async fn fetch_audio(&self, text: &str, voice: &str) -> Result<AudioStream, UpstreamError> {
        let body = format!(
            "&text={}&audio_type=mp3&format=stream",
            urlencoding::encode(text)
        );

        tracing::debug!(
            url = %self.tts_url(voice),
            text_chars = text.chars().count(),
            "Sending TTS segment request"
        );

        let request = self
            .client
            .post(self.tts_url(voice))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body);
        let response = self
            .with_forged_headers(request)
            .await
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::ServiceError(format!("HTTP {}", status)));
        }

        Ok(Box::pin(response.bytes_stream().map_err(classify)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = UpstreamClientConfig::default();
        assert_eq!(config.base_url, "https://api.zmvoice.com");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_config_builder() {
        let config = UpstreamClientConfig::new("http://localhost:9000").with_timeout(5);
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_platform_response_tolerates_missing_fields() {
        let parsed: PlatformResponse =
            serde_json::from_str(r#"{"data":{"list":[{"tag":"v1"},{"title":"orphan"}]}}"#)
                .unwrap();
        let data = parsed.data.unwrap();
        assert_eq!(data.list.len(), 2);
        assert_eq!(data.list[0].tag.as_deref(), Some("v1"));
        assert!(data.list[1].tag.is_none());
    }

    #[test]
    fn test_platform_response_missing_data() {
        let parsed: PlatformResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(parsed.data.is_none());
    }
}
