//! Speech Context - Value Objects

use serde::{Deserialize, Serialize};

use super::SpeechError;

/// Deepgram 默认音色模型
pub const DEFAULT_VOICE_MODEL: &str = "aura-asteria-en";

/// 待合成文本
///
/// 不变量: 去除首尾空白后不能为空
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechText(String);

#[allow(clippy::len_without_is_empty)]
impl SpeechText {
    pub fn new(text: impl Into<String>) -> Result<Self, SpeechError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(SpeechError::EmptyText);
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 字节长度（按不变量恒大于 0）
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl std::fmt::Display for SpeechText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 音色模型标识（后端相关，如 `aura-asteria-en`）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoiceModel(String);

impl VoiceModel {
    pub fn new(model: impl Into<String>) -> Result<Self, SpeechError> {
        let model = model.into();
        let trimmed = model.trim();
        if trimmed.is_empty() {
            return Err(SpeechError::InvalidVoiceModel(model));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(SpeechError::InvalidVoiceModel(model));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for VoiceModel {
    fn default() -> Self {
        Self(DEFAULT_VOICE_MODEL.to_string())
    }
}

impl std::fmt::Display for VoiceModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 输出音频块大小（字节）
///
/// 不变量: 必须大于 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkSize(usize);

impl ChunkSize {
    /// 默认块大小
    pub const DEFAULT: ChunkSize = ChunkSize(4096);

    pub fn new(size: usize) -> Result<Self, SpeechError> {
        if size == 0 {
            return Err(SpeechError::InvalidChunkSize(size));
        }
        Ok(Self(size))
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for ChunkSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
