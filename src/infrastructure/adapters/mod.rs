//! Adapters - 端口的具体实现

mod md5_digest;
mod system_entropy;
pub mod upstream;

pub use md5_digest::Md5Digest;
pub use system_entropy::SystemEntropy;
pub use upstream::{AuthHeaderSet, HeaderForge, UpstreamClient, UpstreamClientConfig};
