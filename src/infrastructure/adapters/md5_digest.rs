//! MD5 摘要适配器
//!
//! 实现 DigestPort，输出 32 位十六进制小写字符串。

use async_trait::async_trait;

use crate::application::ports::DigestPort;

/// MD5 摘要服务
#[derive(Debug, Clone, Default)]
pub struct Md5Digest;

#[async_trait]
impl DigestPort for Md5Digest {
    async fn digest_hex(&self, bytes: &[u8]) -> String {
        format!("{:x}", md5::compute(bytes))
    }
}
