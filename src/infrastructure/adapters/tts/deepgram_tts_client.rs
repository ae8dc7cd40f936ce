//! Deepgram TTS Client - 调用 Deepgram Speak API
//!
//! 实现 TtsEnginePort trait，流式读取合成音频并按固定块大小重新切分
//!
//! 外部 TTS API:
//! POST https://api.deepgram.com/v1/speak?model=aura-asteria-en
//! Headers: Authorization: Token <api_key>, Content-Type: application/json
//! Request: {"text": "..."}  (JSON)
//! Response: 2xx 时为流式音频（通常为 MP3）

use async_trait::async_trait;
use futures_util::{stream, StreamExt, TryStreamExt};
use http::header::AUTHORIZATION;
use reqwest::Client;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::Instrument;

use crate::application::ports::{AudioChunkStream, SynthesisRequest, TtsEnginePort, TtsError};
use crate::domain::speech::{RechunkStream, VoiceModel};

/// Deepgram API 基础 URL
pub const DEEPGRAM_BASE_URL: &str = "https://api.deepgram.com";

const SPEAK_PATH: &str = "/v1/speak";

/// 上游错误响应体保留的最大字符数
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Speak 请求体 (JSON)
#[derive(Debug, Serialize)]
struct SpeakRequestBody<'a> {
    text: &'a str,
}

/// Deepgram TTS 客户端配置
#[derive(Clone)]
pub struct DeepgramTtsClientConfig {
    /// API 基础 URL（测试时可指向本地 mock）
    pub base_url: String,
    /// API Key（由启动层解析后注入）
    pub api_key: String,
    /// 默认音色模型
    pub model: VoiceModel,
    /// 连接 + 响应头超时时间（秒），不限制音频流读取阶段
    pub timeout_secs: u64,
}

impl DeepgramTtsClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEEPGRAM_BASE_URL.to_string(),
            api_key: api_key.into(),
            model: VoiceModel::default(),
            timeout_secs: 15,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: VoiceModel) -> Self {
        self.model = model;
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl std::fmt::Debug for DeepgramTtsClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeepgramTtsClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"***")
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Deepgram TTS 客户端
///
/// 每次调用发起一个 HTTP 请求，无重试、无缓存
pub struct DeepgramTtsClient {
    client: Client,
    config: DeepgramTtsClientConfig,
    header_timeout: Duration,
}

impl DeepgramTtsClient {
    /// 创建新的 Deepgram TTS 客户端
    pub fn new(config: DeepgramTtsClientConfig) -> Result<Self, TtsError> {
        if config.api_key.trim().is_empty() {
            return Err(TtsError::InvalidRequest(
                "Deepgram API key cannot be empty".to_string(),
            ));
        }
        if config.timeout_secs == 0 {
            return Err(TtsError::InvalidRequest(
                "Deepgram timeout must be greater than 0".to_string(),
            ));
        }

        let header_timeout = config.timeout();
        let client = Client::builder()
            .connect_timeout(header_timeout)
            .build()
            .map_err(|e| TtsError::NetworkError(e.to_string()))?;

        Ok(Self {
            client,
            config,
            header_timeout,
        })
    }

    /// 获取 Speak URL
    fn speak_url(&self) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), SPEAK_PATH)
    }

    fn map_send_error(&self, e: reqwest::Error) -> TtsError {
        if e.is_timeout() {
            TtsError::Timeout(self.header_timeout)
        } else if e.is_connect() {
            TtsError::NetworkError(format!("Cannot connect to Deepgram: {}", e))
        } else {
            TtsError::NetworkError(e.to_string())
        }
    }

    async fn open_stream(
        &self,
        request: SynthesisRequest,
        model: &VoiceModel,
    ) -> Result<AudioChunkStream, TtsError> {
        let started = Instant::now();

        tracing::debug!(
            url = %self.speak_url(),
            text_len = request.text.len(),
            chunk_size = request.chunk_size.get(),
            "Sending Deepgram speak request"
        );

        let send = self
            .client
            .post(self.speak_url())
            .query(&[("model", model.as_str())])
            .header(AUTHORIZATION, format!("Token {}", self.config.api_key))
            .json(&SpeakRequestBody {
                text: request.text.as_str(),
            })
            .send();

        // 超时只覆盖连接与响应头，流式读取阶段不受限制
        let response = match tokio::time::timeout(self.header_timeout, send).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => return Err(self.map_send_error(e)),
            Err(_) => return Err(TtsError::Timeout(self.header_timeout)),
        };

        let status = response.status();
        if !status.is_success() {
            let error_text = tokio::time::timeout(self.header_timeout, response.text())
                .await
                .ok()
                .and_then(Result::ok)
                .unwrap_or_default();
            let message: String = error_text.chars().take(MAX_ERROR_BODY_CHARS).collect();
            tracing::warn!(status = status.as_u16(), error = %message, "Deepgram speak request rejected");
            return Err(TtsError::UpstreamError {
                status: status.as_u16(),
                message,
            });
        }

        tracing::info!(
            status = status.as_u16(),
            header_latency_ms = started.elapsed().as_millis() as u64,
            "Deepgram speech stream opened"
        );

        let fragments = Box::pin(
            response
                .bytes_stream()
                .map_err(|e| TtsError::NetworkError(format!("Failed to read audio stream: {}", e))),
        );

        // 转换阶段在独立 span 中轮询
        let convert_span = tracing::debug_span!(
            "synthesizer.deepgram.convert",
            model = %model,
            chunk_size = request.chunk_size.get()
        );
        let mut chunks = RechunkStream::new(fragments, request.chunk_size);
        Ok(Box::pin(stream::poll_fn(move |cx| {
            let _entered = convert_span.enter();
            chunks.poll_next_unpin(cx)
        })))
    }
}

#[async_trait]
impl TtsEnginePort for DeepgramTtsClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<AudioChunkStream, TtsError> {
        let model = request
            .voice_model
            .clone()
            .unwrap_or_else(|| self.config.model.clone());

        let span = tracing::debug_span!("synthesizer.deepgram", model = %model);
        self.open_stream(request, &model).instrument(span).await
    }

    fn name(&self) -> &'static str {
        "deepgram"
    }
}
