//! TTS Engine Port - TTS 合成引擎抽象
//!
//! 定义流式语音合成的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::BoxStream;
use std::time::Duration;
use thiserror::Error;

use crate::domain::speech::{ChunkSize, SpeechText, VoiceModel};

/// TTS 错误
#[derive(Debug, Error)]
pub enum TtsError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout after {0:?}")]
    Timeout(Duration),

    #[error("Upstream returned HTTP {status}: {message}")]
    UpstreamError { status: u16, message: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl TtsError {
    /// 连接失败或超时（未拿到上游响应）
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::NetworkError(_) | Self::Timeout(_))
    }

    /// 上游返回的 HTTP 状态码
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::UpstreamError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// 固定大小音频块的惰性流
///
/// 单次消费、不可重启；除最后一块外每块长度都等于请求的 chunk_size。
/// Drop 该流即关闭底层连接。
pub type AudioChunkStream = BoxStream<'static, Result<Bytes, TtsError>>;

/// TTS 合成请求
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    /// 要合成的文本内容
    pub text: SpeechText,
    /// 音色模型，None 时使用引擎配置的默认模型
    pub voice_model: Option<VoiceModel>,
    /// 输出块大小
    pub chunk_size: ChunkSize,
}

impl SynthesisRequest {
    pub fn new(text: SpeechText, chunk_size: ChunkSize) -> Self {
        Self {
            text,
            voice_model: None,
            chunk_size,
        }
    }

    pub fn with_voice_model(mut self, model: VoiceModel) -> Self {
        self.voice_model = Some(model);
        self
    }
}

/// TTS Engine Port
///
/// 外部 TTS 服务的抽象接口
#[async_trait]
pub trait TtsEnginePort: Send + Sync {
    /// 发起一次合成
    ///
    /// 返回 Ok 时上游已响应成功（2xx），音频块按需从流中拉取；
    /// 非 2xx、连接失败或超时在返回前即以 Err 报告，不产生任何音频块。
    async fn synthesize(&self, request: SynthesisRequest) -> Result<AudioChunkStream, TtsError>;

    /// 引擎名称（用于日志）
    fn name(&self) -> &'static str;
}
