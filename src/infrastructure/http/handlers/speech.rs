//! Speech Handlers - 流式语音合成中继

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::Response,
    Json,
};
use futures_util::TryStreamExt;
use serde::Deserialize;
use std::sync::Arc;

use crate::application::SynthesizeSpeech;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SpeakRequest {
    pub text: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub chunk_size: Option<usize>,
}

/// 合成语音并以分块传输返回音频
///
/// 上游响应之前的错误以 JSON 错误体返回；开始传输后的错误会中断响应体。
/// 客户端断开时流被 drop，上游连接随之关闭。
pub async fn speak(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SpeakRequest>,
) -> Result<Response, ApiError> {
    let command = SynthesizeSpeech {
        text: req.text,
        voice_model: req.model,
        chunk_size: req.chunk_size,
    };

    let stream = state.synthesize_speech_handler.handle(command).await?;
    let engine = state.tts_engine.name();
    let body = Body::from_stream(stream.inspect_err(move |e| {
        tracing::warn!(engine, error = %e, "Audio stream aborted");
    }));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "audio/mpeg")
        .header(header::CACHE_CONTROL, "no-store")
        .body(body)
        .map_err(|e| ApiError::Internal(format!("Failed to build response: {}", e)))
}
