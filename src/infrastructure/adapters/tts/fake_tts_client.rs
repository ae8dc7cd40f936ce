//! Fake TTS Client - 用于测试的 TTS 客户端
//!
//! 始终返回固定的音频数据，不实际调用 TTS 服务

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream;
use std::path::Path;

use crate::application::ports::{AudioChunkStream, SynthesisRequest, TtsEnginePort, TtsError};
use crate::domain::speech::RechunkStream;

/// Fake TTS Client 配置
#[derive(Debug, Clone)]
pub struct FakeTtsClientConfig {
    /// 固定返回的音频数据
    pub audio: Bytes,
    /// 模拟传输层的片段大小
    pub fragment_size: usize,
    /// 模拟上游失败时返回的 HTTP 状态码
    pub fail_with_status: Option<u16>,
}

impl Default for FakeTtsClientConfig {
    fn default() -> Self {
        Self {
            audio: Bytes::from_static(&[0u8; 16 * 1024]),
            fragment_size: 1000,
            fail_with_status: None,
        }
    }
}

impl FakeTtsClientConfig {
    pub fn new(audio: impl Into<Bytes>) -> Self {
        Self {
            audio: audio.into(),
            ..Default::default()
        }
    }

    pub fn with_fragment_size(mut self, size: usize) -> Self {
        self.fragment_size = size.max(1);
        self
    }

    pub fn failing(mut self, status: u16) -> Self {
        self.fail_with_status = Some(status);
        self
    }
}

/// Fake TTS Client
///
/// 用于测试，把配置的音频按 fragment_size 切成片段后走与真实客户端相同的重分块流程
pub struct FakeTtsClient {
    config: FakeTtsClientConfig,
}

impl FakeTtsClient {
    /// 创建新的 FakeTtsClient
    pub fn new(config: FakeTtsClientConfig) -> Self {
        tracing::info!(
            audio_size = config.audio.len(),
            fragment_size = config.fragment_size,
            "FakeTtsClient initialized"
        );
        Self { config }
    }

    /// 从音频文件创建
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, std::io::Error> {
        let audio = std::fs::read(path.as_ref())?;
        Ok(Self::new(FakeTtsClientConfig::new(audio)))
    }

    /// 使用默认配置创建
    pub fn with_defaults() -> Self {
        Self::new(FakeTtsClientConfig::default())
    }
}

#[async_trait]
impl TtsEnginePort for FakeTtsClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<AudioChunkStream, TtsError> {
        tracing::debug!(
            text_len = request.text.len(),
            voice_model = ?request.voice_model,
            chunk_size = request.chunk_size.get(),
            "FakeTtsClient: returning fixed audio"
        );

        if let Some(status) = self.config.fail_with_status {
            return Err(TtsError::UpstreamError {
                status,
                message: "fake upstream failure".to_string(),
            });
        }

        let audio = self.config.audio.clone();
        let fragment_size = self.config.fragment_size.max(1);
        let fragments: Vec<Result<Bytes, TtsError>> = (0..audio.len())
            .step_by(fragment_size)
            .map(|start| Ok(audio.slice(start..(start + fragment_size).min(audio.len()))))
            .collect();

        Ok(Box::pin(RechunkStream::new(
            stream::iter(fragments),
            request.chunk_size,
        )))
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::speech::{ChunkSize, SpeechText};
    use futures_util::StreamExt;

    fn request(chunk: usize) -> SynthesisRequest {
        SynthesisRequest::new(SpeechText::new("hello").unwrap(), ChunkSize::new(chunk).unwrap())
    }

    #[tokio::test]
    async fn test_fake_rechunks_configured_audio() {
        let audio: Vec<u8> = (0..10_000u32).map(|i| (i % 256) as u8).collect();
        let client = FakeTtsClient::new(FakeTtsClientConfig::new(audio.clone()).with_fragment_size(333));

        let chunks: Vec<Bytes> = client
            .synthesize(request(4096))
            .await
            .unwrap()
            .map(|c| c.unwrap())
            .collect()
            .await;

        let sizes: Vec<usize> = chunks.iter().map(|c| c.len()).collect();
        assert_eq!(sizes, vec![4096, 4096, 1808]);
        assert_eq!(chunks.concat(), audio);
    }

    #[tokio::test]
    async fn test_fake_failure_returns_upstream_error() {
        let client = FakeTtsClient::new(FakeTtsClientConfig::default().failing(500));
        let err = client.synthesize(request(1024)).await.err().unwrap();
        assert_eq!(err.upstream_status(), Some(500));
    }

    #[tokio::test]
    async fn test_fake_empty_audio_yields_no_chunks() {
        let client = FakeTtsClient::new(FakeTtsClientConfig::new(Vec::<u8>::new()));
        let chunks: Vec<_> = client.synthesize(request(1024)).await.unwrap().collect().await;
        assert!(chunks.is_empty());
    }
}
