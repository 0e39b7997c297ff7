//! 端到端拉取管线测试
//!
//! 用 wiremock 模拟上游平台，验证：
//! - 批量并发下输出顺序与片段原始顺序一致（对抗性延迟）
//! - 单片段失败只让输出变短，不中断整个流
//! - 伪造认证头与表单请求体的线上格式
//! - 音色目录解析与畸形响应处理

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use futures_util::StreamExt;
use wiremock::matchers::{body_string, body_string_contains, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use zmgate::application::synthesis::{SynthesisConfig, SynthesisService};
use zmgate::application::{TtsUpstreamPort, UpstreamError};
use zmgate::domain::BrowserProfile;
use zmgate::infrastructure::adapters::{
    HeaderForge, Md5Digest, SystemEntropy, UpstreamClient, UpstreamClientConfig,
};

fn upstream_for(server: &MockServer) -> Arc<UpstreamClient> {
    let forge = HeaderForge::new(
        BrowserProfile::default(),
        Arc::new(SystemEntropy),
        Arc::new(Md5Digest),
    );
    let config = UpstreamClientConfig::new(server.uri()).with_timeout(10);
    Arc::new(UpstreamClient::new(config, forge).expect("upstream client"))
}

fn service_for(server: &MockServer, max_segment_chars: usize) -> SynthesisService {
    SynthesisService::new(
        upstream_for(server),
        SynthesisConfig {
            max_segment_chars,
            concurrency: 3,
        },
    )
}

/// 挂载一个片段的 TTS mock
async fn mount_segment(server: &MockServer, text: &str, body: &'static [u8], delay_ms: u64) {
    Mock::given(method("POST"))
        .and(path("/api/tts/v1"))
        .and(query_param("roleid", "v1"))
        .and(body_string_contains(format!("text={}", text)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(body)
                .set_delay(Duration::from_millis(delay_ms)),
        )
        .mount(server)
        .await;
}

async fn collect(stream: impl futures_util::Stream<Item = Bytes>) -> Vec<Bytes> {
    stream.collect::<Vec<_>>().await
}

#[tokio::test]
async fn batched_output_order_matches_segment_order_under_inverted_latency() {
    let server = MockServer::start().await;

    // 片段 0 最慢、片段 4 最快，完成顺序与输入顺序完全颠倒
    mount_segment(&server, "seg0", b"A0", 250).await;
    mount_segment(&server, "seg1", b"A1", 200).await;
    mount_segment(&server, "seg2", b"A2", 150).await;
    mount_segment(&server, "seg3", b"A3", 100).await;
    mount_segment(&server, "seg4", b"A4", 50).await;

    let service = service_for(&server, 200);
    let segments: Vec<String> = (0..5).map(|i| format!("seg{}", i)).collect();
    let out = collect(service.fetch_chunks(segments, "v1".to_string(), 2)).await;

    let expected: Vec<Bytes> = vec![
        Bytes::from_static(b"A0"),
        Bytes::from_static(b"A1"),
        Bytes::from_static(b"A2"),
        Bytes::from_static(b"A3"),
        Bytes::from_static(b"A4"),
    ];
    assert_eq!(out, expected);
}

#[tokio::test]
async fn failed_segment_omitted_without_placeholder() {
    let server = MockServer::start().await;

    mount_segment(&server, "seg0", b"A0", 10).await;
    mount_segment(&server, "seg1", b"A1", 10).await;
    Mock::given(method("POST"))
        .and(path("/api/tts/v1"))
        .and(body_string_contains("text=seg2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_segment(&server, "seg3", b"A3", 10).await;
    mount_segment(&server, "seg4", b"A4", 10).await;

    let service = service_for(&server, 200);
    let segments: Vec<String> = (0..5).map(|i| format!("seg{}", i)).collect();
    let out = collect(service.fetch_chunks(segments, "v1".to_string(), 2)).await;

    let expected: Vec<Bytes> = vec![
        Bytes::from_static(b"A0"),
        Bytes::from_static(b"A1"),
        Bytes::from_static(b"A3"),
        Bytes::from_static(b"A4"),
    ];
    assert_eq!(out, expected);
}

#[tokio::test]
async fn synthesize_splits_text_and_concatenates_in_order() {
    let server = MockServer::start().await;

    mount_segment(&server, "alpha", b"A", 30).await;
    mount_segment(&server, "beta", b"B", 20).await;
    mount_segment(&server, "gamma", b"C", 10).await;

    // 6 字符上限强制分割为三个句子片段
    let service = service_for(&server, 6);
    let stream = service
        .synthesize("alpha。beta。gamma。", "v1", Some(2))
        .expect("stream");
    let out = collect(stream).await;

    let joined: Vec<u8> = out.iter().flat_map(|b| b.to_vec()).collect();
    assert_eq!(joined, b"ABC");
}

#[tokio::test]
async fn tts_request_carries_forged_headers_and_form_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/tts/v1"))
        .and(query_param("roleid", "v1"))
        .and(header_exists("device-platform"))
        .and(header_exists("zm-ver"))
        .and(header_exists("timestamp"))
        .and(header_exists("access-token"))
        .and(header_exists("zm-ua"))
        .and(header_exists("zm-token"))
        .and(body_string("&text=hello&audio_type=mp3&format=stream"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"audio" as &[u8]))
        .expect(1)
        .mount(&server)
        .await;

    let upstream = upstream_for(&server);
    let mut stream = upstream.fetch_audio("hello", "v1").await.expect("stream");

    let mut collected = Vec::new();
    while let Some(chunk) = stream.next().await {
        collected.extend_from_slice(&chunk.expect("chunk"));
    }
    assert_eq!(collected, b"audio");
}

#[tokio::test]
async fn voice_catalog_parsed_with_fallback_fields() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/robot/platform"))
        .and(header_exists("zm-token"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"data":{"list":[
                {"tag":"v1","title":"少女音","icon":"https://cdn.example.com/v1.png"},
                {"tag":"v2"},
                {"title":"no-tag-entry"}
            ]}}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let upstream = upstream_for(&server);
    let catalog = upstream.fetch_voice_list().await.expect("catalog");

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.get("v1").unwrap().name, "少女音");
    assert_eq!(
        catalog.get("v1").unwrap().icon_url,
        "https://cdn.example.com/v1.png"
    );
    // title 缺省时回落到 tag，icon 缺省为空串
    assert_eq!(catalog.get("v2").unwrap().name, "v2");
    assert_eq!(catalog.get("v2").unwrap().icon_url, "");
}

#[tokio::test]
async fn malformed_catalog_is_recoverable_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/robot/platform"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{"foo":1}"#, "application/json"))
        .mount(&server)
        .await;

    let upstream = upstream_for(&server);
    let result = upstream.fetch_voice_list().await;
    assert!(matches!(result, Err(UpstreamError::InvalidResponse(_))));
}

#[tokio::test]
async fn catalog_http_error_reported_as_service_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/robot/platform"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let upstream = upstream_for(&server);
    let result = upstream.fetch_voice_list().await;
    assert!(matches!(result, Err(UpstreamError::ServiceError(_))));
}
