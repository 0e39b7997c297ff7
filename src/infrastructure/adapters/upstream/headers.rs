//! 请求头伪造器
//!
//! 为每次上游调用组装完整的七字段认证头。所有字段每次重新计算，
//! 不缓存、不复用——每个请求都是一个全新的、自洽的"设备会话"。

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::ports::DigestPort;
use crate::domain::{session_identifier, BrowserProfile, EntropySource};

/// 固定设备平台标识
const DEVICE_PLATFORM: &str = "web";

/// 固定协议版本
const PROTOCOL_VERSION: &str = "1.0.0";

/// 七字段认证头集合
///
/// 字段顺序固定，zm-token 的拼接顺序与线上协议一致，不可调整。
#[derive(Debug, Clone)]
pub struct AuthHeaderSet {
    pub device_platform: String,
    pub zm_ver: String,
    pub timestamp: String,
    pub access_token: String,
    pub zm_ua: String,
    pub zm_token: String,
    pub user_agent: String,
}

impl AuthHeaderSet {
    /// 按固定顺序导出 (header 名, 值) 对
    pub fn as_pairs(&self) -> [(&'static str, &str); 7] {
        [
            ("device-platform", &self.device_platform),
            ("zm-ver", &self.zm_ver),
            ("timestamp", &self.timestamp),
            ("access-token", &self.access_token),
            ("zm-ua", &self.zm_ua),
            ("zm-token", &self.zm_token),
            ("User-Agent", &self.user_agent),
        ]
    }
}

/// 请求头伪造器
pub struct HeaderForge {
    profile: BrowserProfile,
    entropy: Arc<dyn EntropySource>,
    digest: Arc<dyn DigestPort>,
}

impl HeaderForge {
    pub fn new(
        profile: BrowserProfile,
        entropy: Arc<dyn EntropySource>,
        digest: Arc<dyn DigestPort>,
    ) -> Self {
        Self { profile, entropy, digest }
    }

    /// 组装完整认证头
    ///
    /// zm-ua 是固定 User-Agent 的摘要；zm-token 是
    /// `device-platform + timestamp + zm-ver + access-token + zm-ua`
    /// 的摘要，拼接顺序是线上协议的一部分。
    pub async fn build_headers(&self) -> AuthHeaderSet {
        let timestamp = self.timestamp();
        let access_token = session_identifier(&self.profile, self.entropy.as_ref());
        let zm_ua = self
            .digest
            .digest_hex(self.profile.user_agent.as_bytes())
            .await;
        let token_source = format!(
            "{}{}{}{}{}",
            DEVICE_PLATFORM, timestamp, PROTOCOL_VERSION, access_token, zm_ua,
        );
        let zm_token = self.digest.digest_hex(token_source.as_bytes()).await;

        AuthHeaderSet {
            device_platform: DEVICE_PLATFORM.to_string(),
            zm_ver: PROTOCOL_VERSION.to_string(),
            timestamp,
            access_token,
            zm_ua,
            zm_token,
            user_agent: self.profile.user_agent.clone(),
        }
    }

    /// 生成带 +08:00 后缀的 ISO-8601 时间戳
    ///
    /// 上游的做法是把当前时间整体平移 8 小时后替换 UTC 的 Z 标记，
    /// 并非真正的时区转换，这里保持同样的行为。
    fn timestamp(&self) -> String {
        let shifted_millis = self.entropy.now_millis() as i64 + 8 * 3600 * 1000;
        let shifted: DateTime<Utc> =
            DateTime::from_timestamp_millis(shifted_millis).unwrap_or_else(Utc::now);
        format!("{}+08:00", shifted.format("%Y-%m-%dT%H:%M:%S%.3f"))
    }
}
