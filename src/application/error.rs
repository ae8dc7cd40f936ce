//! 应用层错误定义
//!
//! 统一的命令错误类型

use thiserror::Error;

use crate::application::ports::TtsError;
use crate::domain::speech::SpeechError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 上游 TTS 服务返回非 2xx
    #[error("Upstream TTS error (HTTP {status}): {message}")]
    UpstreamError { status: u16, message: String },

    /// 外部服务不可达（连接失败或超时）
    #[error("External service error: {0}")]
    ExternalServiceError(String),
}

impl ApplicationError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }
}

impl From<SpeechError> for ApplicationError {
    fn from(err: SpeechError) -> Self {
        Self::ValidationError(err.to_string())
    }
}

impl From<TtsError> for ApplicationError {
    fn from(err: TtsError) -> Self {
        match err {
            TtsError::UpstreamError { status, message } => Self::UpstreamError { status, message },
            TtsError::NetworkError(_) | TtsError::Timeout(_) => {
                Self::ExternalServiceError(err.to_string())
            }
            TtsError::InvalidRequest(msg) => Self::ValidationError(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_tts_error_mapping() {
        let err: ApplicationError = TtsError::UpstreamError {
            status: 401,
            message: "bad key".into(),
        }
        .into();
        assert!(matches!(err, ApplicationError::UpstreamError { status: 401, .. }));

        let err: ApplicationError = TtsError::Timeout(Duration::from_secs(15)).into();
        assert!(matches!(err, ApplicationError::ExternalServiceError(_)));
    }

    #[test]
    fn test_speech_error_is_validation() {
        let err: ApplicationError = SpeechError::EmptyText.into();
        assert!(matches!(err, ApplicationError::ValidationError(_)));
    }
}
