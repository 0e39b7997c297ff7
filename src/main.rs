//! Zmgate - 浏览器身份伪装 TTS 网关

use std::sync::Arc;

use zmgate::application::synthesis::{SynthesisConfig, SynthesisService};
use zmgate::application::TtsUpstreamPort;
use zmgate::config::{load_config, print_config};
use zmgate::domain::VoiceCatalog;
use zmgate::infrastructure::adapters::{
    HeaderForge, Md5Digest, SystemEntropy, UpstreamClient, UpstreamClientConfig,
};
use zmgate::infrastructure::http::{AppState, HttpServer, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},zmgate={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Zmgate - 浏览器身份伪装 TTS 网关");
    print_config(&config);

    // 创建上游客户端（每次调用重新伪造认证头）
    let forge = HeaderForge::new(
        config.fingerprint.clone(),
        Arc::new(SystemEntropy),
        Arc::new(Md5Digest),
    );
    let upstream_config = UpstreamClientConfig {
        base_url: config.upstream.base_url.clone(),
        timeout_secs: config.upstream.timeout_secs,
    };
    let upstream = Arc::new(
        UpstreamClient::new(upstream_config, forge)
            .map_err(|e| anyhow::anyhow!("Failed to create upstream client: {}", e))?,
    );

    // 启动时加载音色目录，失败或为空时安装兜底目录
    let catalog = match upstream.fetch_voice_list().await {
        Ok(catalog) if !catalog.is_empty() => {
            tracing::info!(voices = catalog.len(), "Voice catalog loaded");
            catalog
        }
        Ok(_) => {
            tracing::warn!("Voice catalog empty, installing fallback entry");
            VoiceCatalog::fallback()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load voice catalog, installing fallback entry");
            VoiceCatalog::fallback()
        }
    };

    // 创建合成服务
    let synthesis = SynthesisService::new(
        upstream.clone() as Arc<dyn TtsUpstreamPort>,
        SynthesisConfig {
            max_segment_chars: config.synthesis.max_segment_chars,
            concurrency: config.synthesis.concurrency,
        },
    );

    // 创建 HTTP 服务器
    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let state = AppState::new(
        Arc::new(catalog),
        synthesis,
        config.auth.api_key.clone(),
    );

    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for ctrl-c");
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
