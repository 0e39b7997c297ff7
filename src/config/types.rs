//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

use crate::domain::BrowserProfile;

/// 应用主配置
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 上游平台配置
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// 授权配置
    #[serde(default)]
    pub auth: AuthConfig,

    /// 合成配置
    #[serde(default)]
    pub synthesis: SynthesisConfig,

    /// 浏览器指纹常量（一般不需要覆盖）
    #[serde(default)]
    pub fingerprint: BrowserProfile,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8100
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 上游平台配置
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// 上游平台基础 URL
    #[serde(default = "default_upstream_url")]
    pub base_url: String,

    /// 单次请求超时时间（秒）
    #[serde(default = "default_upstream_timeout")]
    pub timeout_secs: u64,
}

fn default_upstream_url() -> String {
    "https://api.zmvoice.com".to_string()
}

fn default_upstream_timeout() -> u64 {
    30
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_upstream_url(),
            timeout_secs: default_upstream_timeout(),
        }
    }
}

/// 授权配置
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AuthConfig {
    /// 静态授权 key，未设置时不校验请求
    #[serde(default)]
    pub api_key: Option<String>,
}

/// 合成配置
#[derive(Debug, Clone, Deserialize)]
pub struct SynthesisConfig {
    /// 最大片段字符数
    #[serde(default = "default_max_segment_chars")]
    pub max_segment_chars: usize,

    /// 默认并发度
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

fn default_max_segment_chars() -> usize {
    200
}

fn default_concurrency() -> usize {
    3
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            max_segment_chars: default_max_segment_chars(),
            concurrency: default_concurrency(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
