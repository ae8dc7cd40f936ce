//! Speech Command Handlers

use std::sync::Arc;

use crate::application::commands::SynthesizeSpeech;
use crate::application::error::ApplicationError;
use crate::application::ports::{AudioChunkStream, SynthesisRequest, TtsEnginePort};
use crate::domain::speech::{ChunkSize, SpeechText, VoiceModel};

// ============================================================================
// SynthesizeSpeech
// ============================================================================

/// 块大小限制
#[derive(Debug, Clone, Copy)]
pub struct ChunkLimits {
    /// 未指定时使用的块大小
    pub default_size: ChunkSize,
    /// 调用方可请求的最大块大小
    pub max_size: usize,
}

impl Default for ChunkLimits {
    fn default() -> Self {
        Self {
            default_size: ChunkSize::DEFAULT,
            max_size: 1024 * 1024,
        }
    }
}

/// SynthesizeSpeech Handler
pub struct SynthesizeSpeechHandler {
    tts_engine: Arc<dyn TtsEnginePort>,
    limits: ChunkLimits,
}

impl SynthesizeSpeechHandler {
    pub fn new(tts_engine: Arc<dyn TtsEnginePort>, limits: ChunkLimits) -> Self {
        Self { tts_engine, limits }
    }

    /// 校验命令并构造合成请求
    pub fn prepare(&self, command: SynthesizeSpeech) -> Result<SynthesisRequest, ApplicationError> {
        let text = SpeechText::new(command.text)?;

        let chunk_size = match command.chunk_size {
            Some(size) => ChunkSize::new(size)?,
            None => self.limits.default_size,
        };
        if chunk_size.get() > self.limits.max_size {
            return Err(ApplicationError::validation(format!(
                "Chunk size {} exceeds maximum {}",
                chunk_size, self.limits.max_size
            )));
        }

        let mut request = SynthesisRequest::new(text, chunk_size);
        if let Some(model) = command.voice_model {
            request = request.with_voice_model(VoiceModel::new(model)?);
        }
        Ok(request)
    }

    pub async fn handle(&self, command: SynthesizeSpeech) -> Result<AudioChunkStream, ApplicationError> {
        let request = self.prepare(command)?;

        tracing::debug!(
            engine = self.tts_engine.name(),
            text_len = request.text.len(),
            voice_model = ?request.voice_model,
            chunk_size = request.chunk_size.get(),
            "Synthesizing speech"
        );

        let stream = self.tts_engine.synthesize(request).await?;
        Ok(stream)
    }
}
