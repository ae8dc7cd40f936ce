//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::{AppConfig, TtsConfig, TtsEngineKind};

/// Deepgram API Key 的环境变量名
pub const DEEPGRAM_API_KEY_ENV: &str = "DEEPGRAM_API_KEY";

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `SPEAKRELAY_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `SPEAKRELAY_SERVER__PORT=8080`
/// - `SPEAKRELAY_TTS__MODEL=aura-luna-en`
/// - `SPEAKRELAY_TTS__CHUNK_SIZE=8192`
/// - `SPEAKRELAY_TTS__ENGINE=fake`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5080)?
        .set_default("tts.engine", "deepgram")?
        .set_default("tts.base_url", "https://api.deepgram.com")?
        .set_default("tts.model", "aura-asteria-en")?
        .set_default("tts.timeout_secs", 15)?
        .set_default("tts.chunk_size", 4096)?
        .set_default("tts.max_chunk_size", 1024 * 1024)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: SPEAKRELAY_TTS__BASE_URL=http://localhost:9000
    builder = builder.add_source(
        Environment::with_prefix("SPEAKRELAY")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.tts.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "TTS base URL cannot be empty".to_string(),
        ));
    }

    if config.tts.model.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "TTS model cannot be empty".to_string(),
        ));
    }

    if config.tts.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "TTS timeout cannot be 0".to_string(),
        ));
    }

    if config.tts.chunk_size == 0 || config.tts.chunk_size > config.tts.max_chunk_size {
        return Err(ConfigError::ValidationError(format!(
            "TTS chunk size must be in 1..={}, got {}",
            config.tts.max_chunk_size, config.tts.chunk_size
        )));
    }

    Ok(())
}

/// 解析 Deepgram API Key
///
/// 优先使用配置中的 `tts.api_key`，否则读取 `DEEPGRAM_API_KEY` 环境变量。
/// 只在启动层调用，TTS 客户端本身不读取环境变量。
pub fn resolve_api_key(config: &TtsConfig) -> Result<String, ConfigError> {
    resolve_api_key_from(config, std::env::var(DEEPGRAM_API_KEY_ENV).ok())
}

fn resolve_api_key_from(config: &TtsConfig, env_value: Option<String>) -> Result<String, ConfigError> {
    config
        .api_key
        .clone()
        .filter(|key| !key.trim().is_empty())
        .or_else(|| env_value.filter(|key| !key.trim().is_empty()))
        .ok_or_else(|| {
            ConfigError::ValidationError(format!(
                "Deepgram API key not configured (set tts.api_key or {})",
                DEEPGRAM_API_KEY_ENV
            ))
        })
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("TTS Engine: {}", config.tts.engine);
    if config.tts.engine == TtsEngineKind::Deepgram {
        tracing::info!("TTS Base URL: {}", config.tts.base_url);
        tracing::info!("TTS Model: {}", config.tts.model);
        tracing::info!("TTS Timeout: {}s", config.tts.timeout_secs);
        tracing::info!(
            "TTS API Key: {}",
            if config.tts.api_key.is_some() { "configured" } else { "from environment" }
        );
    }
    tracing::info!(
        "Chunk Size: {} (max {})",
        config.tts.chunk_size,
        config.tts.max_chunk_size
    );
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
