//! Digest Port - 摘要原语抽象
//!
//! zm-ua / zm-token 两个头部字段依赖的外部摘要服务。核心只要求
//! 确定性与稳定的十六进制编码，具体算法由适配器决定。

use async_trait::async_trait;

/// Digest Port
#[async_trait]
pub trait DigestPort: Send + Sync {
    /// 计算字节序列的摘要，返回定长十六进制字符串
    async fn digest_hex(&self, bytes: &[u8]) -> String;
}
