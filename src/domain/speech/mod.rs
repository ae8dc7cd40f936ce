//! Speech Context - 语音合成限界上下文
//!
//! 职责:
//! - 合成请求的值对象（文本、音色模型、块大小）
//! - 音频流重分块

mod errors;
mod rechunk;
mod value_objects;

pub use errors::SpeechError;
pub use rechunk::RechunkStream;
pub use value_objects::{ChunkSize, SpeechText, VoiceModel, DEFAULT_VOICE_MODEL};
