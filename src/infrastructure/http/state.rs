//! Application State
//!
//! HTTP 层共享的端口与 Command Handlers

use std::sync::Arc;

use crate::application::{ChunkLimits, SynthesizeSpeechHandler, TtsEnginePort};

/// 应用状态
pub struct AppState {
    pub tts_engine: Arc<dyn TtsEnginePort>,
    pub synthesize_speech_handler: SynthesizeSpeechHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(tts_engine: Arc<dyn TtsEnginePort>, limits: ChunkLimits) -> Self {
        Self {
            tts_engine: tts_engine.clone(),
            synthesize_speech_handler: SynthesizeSpeechHandler::new(tts_engine, limits),
        }
    }
}
