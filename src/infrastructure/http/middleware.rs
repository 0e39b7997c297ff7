//! HTTP Middleware
//!
//! 静态授权 key 校验与 HTTP 状态码错误日志

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::error::ApiError;
use super::state::AppState;

/// 授权校验中间件
///
/// 配置了 api_key 时比较 Authorization 头（支持 `Bearer <key>`
/// 或裸 key）；未配置时直接放行。
pub async fn require_api_key(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(expected) = &state.api_key {
        let provided = request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.strip_prefix("Bearer ").unwrap_or(v));

        if provided != Some(expected.as_str()) {
            return ApiError::Unauthorized("Invalid or missing API key".to_string())
                .into_response();
        }
    }

    next.run(request).await
}

/// HTTP 状态码错误日志中间件
///
/// 拦截 HTTP 响应，当状态码为 4xx 或 5xx 时记录日志
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;
    let status = response.status();

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            "HTTP client error"
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        routing::get,
        Router,
    };
    use tower::util::ServiceExt;

    use super::*;
    use crate::application::{SynthesisConfig, SynthesisService};
    use crate::domain::VoiceCatalog;
    use crate::infrastructure::adapters::{
        HeaderForge, Md5Digest, SystemEntropy, UpstreamClient, UpstreamClientConfig,
    };

    async fn ok_handler() -> &'static str {
        "OK"
    }

    fn test_state(api_key: Option<&str>) -> Arc<AppState> {
        let forge = HeaderForge::new(
            Default::default(),
            Arc::new(SystemEntropy),
            Arc::new(Md5Digest),
        );
        let client =
            UpstreamClient::new(UpstreamClientConfig::default(), forge).expect("client");
        let synthesis = SynthesisService::new(Arc::new(client), SynthesisConfig::default());
        Arc::new(AppState::new(
            Arc::new(VoiceCatalog::fallback()),
            synthesis,
            api_key.map(|k| k.to_string()),
        ))
    }

    fn guarded_router(api_key: Option<&str>) -> Router {
        let state = test_state(api_key);
        Router::new()
            .route("/guarded", get(ok_handler))
            .layer(axum::middleware::from_fn_with_state(
                state.clone(),
                require_api_key,
            ))
            .with_state(state)
    }

    #[tokio::test]
    async fn test_no_key_configured_allows_all() {
        let app = guarded_router(None);
        let request = HttpRequest::builder()
            .uri("/guarded")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_key_rejected() {
        let app = guarded_router(Some("secret"));
        let request = HttpRequest::builder()
            .uri("/guarded")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_bearer_key_accepted() {
        let app = guarded_router(Some("secret"));
        let request = HttpRequest::builder()
            .uri("/guarded")
            .header("Authorization", "Bearer secret")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_raw_key_accepted() {
        let app = guarded_router(Some("secret"));
        let request = HttpRequest::builder()
            .uri("/guarded")
            .header("Authorization", "secret")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_wrong_key_rejected() {
        let app = guarded_router(Some("secret"));
        let request = HttpRequest::builder()
            .uri("/guarded")
            .header("Authorization", "Bearer wrong")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
