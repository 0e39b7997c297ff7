//! HTTP Handlers

mod ping;
mod tts;
mod voices;

pub use ping::ping;
pub use tts::synthesize;
pub use voices::list_voices;
