//! speakrelay - Deepgram 流式语音合成中继
//!
//! 启动流程: 加载配置 → 初始化日志 → 解析 API Key → 创建 TTS 引擎 → 启动 HTTP 服务

use std::sync::Arc;

use speakrelay::application::{ChunkLimits, TtsEnginePort};
use speakrelay::config::{load_config, print_config, resolve_api_key, AppConfig, TtsConfig, TtsEngineKind};
use speakrelay::domain::speech::{ChunkSize, VoiceModel};
use speakrelay::infrastructure::adapters::{
    DeepgramTtsClient, DeepgramTtsClientConfig, FakeTtsClient,
};
use speakrelay::infrastructure::http::{AppState, HttpServer, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("speakrelay - Deepgram streaming TTS relay");
    print_config(&config);

    let tts_engine = build_tts_engine(&config.tts)?;
    tracing::info!(engine = tts_engine.name(), "TTS engine ready");

    let limits = ChunkLimits {
        default_size: ChunkSize::new(config.tts.chunk_size)?,
        max_size: config.tts.max_chunk_size,
    };
    let state = AppState::new(tts_engine, limits);

    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let server = HttpServer::new(server_config, state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                return;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// 初始化日志
fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},speakrelay={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// 按配置创建 TTS 引擎
///
/// API Key 在这里解析（配置或 DEEPGRAM_API_KEY），再注入客户端
fn build_tts_engine(config: &TtsConfig) -> anyhow::Result<Arc<dyn TtsEnginePort>> {
    match config.engine {
        TtsEngineKind::Deepgram => {
            let api_key = resolve_api_key(config)?;
            let client_config = DeepgramTtsClientConfig::new(api_key)
                .with_base_url(config.base_url.clone())
                .with_model(VoiceModel::new(config.model.clone())?)
                .with_timeout(config.timeout_secs);
            Ok(Arc::new(DeepgramTtsClient::new(client_config)?))
        }
        TtsEngineKind::Fake => {
            let client = match &config.fake_audio_path {
                Some(path) => FakeTtsClient::from_file(path)?,
                None => FakeTtsClient::with_defaults(),
            };
            Ok(Arc::new(client))
        }
    }
}
