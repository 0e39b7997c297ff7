//! 领域层
//!
//! 纯算法与核心类型：整数哈希、设备指纹、文本分割、音色目录。
//! 不依赖网络与具体运行时，随机性通过端口注入。

pub mod fingerprint;
pub mod hash;
pub mod segmenter;
pub mod voice;

pub use fingerprint::{
    device_fingerprint, session_identifier, BrowserProfile, EntropySource, SESSION_ID_MAX_LEN,
};
pub use hash::hash;
pub use segmenter::{split, DEFAULT_MAX_SEGMENT_CHARS};
pub use voice::{VoiceCatalog, VoiceInfo};
