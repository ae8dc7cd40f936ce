//! TTS Adapter - Deepgram 客户端与测试用 Fake 客户端

mod deepgram_tts_client;
mod fake_tts_client;

pub use deepgram_tts_client::*;
pub use fake_tts_client::{FakeTtsClient, FakeTtsClientConfig};
