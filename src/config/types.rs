//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// TTS 引擎配置
    #[serde(default)]
    pub tts: TtsConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// TTS 引擎类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TtsEngineKind {
    /// Deepgram Speak API
    #[default]
    Deepgram,
    /// 固定音频（测试 / 离线）
    Fake,
}

impl std::fmt::Display for TtsEngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Deepgram => write!(f, "deepgram"),
            Self::Fake => write!(f, "fake"),
        }
    }
}

/// TTS 引擎配置
#[derive(Clone, Deserialize)]
pub struct TtsConfig {
    /// 引擎类型
    #[serde(default)]
    pub engine: TtsEngineKind,

    /// Deepgram API 基础 URL
    #[serde(default = "default_tts_base_url")]
    pub base_url: String,

    /// 默认音色模型
    #[serde(default = "default_tts_model")]
    pub model: String,

    /// API Key，未设置时由启动层从 DEEPGRAM_API_KEY 读取
    #[serde(default)]
    pub api_key: Option<String>,

    /// 连接 + 响应头超时时间（秒）
    #[serde(default = "default_tts_timeout")]
    pub timeout_secs: u64,

    /// 默认输出块大小（字节）
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// 调用方可请求的最大块大小（字节）
    #[serde(default = "default_max_chunk_size")]
    pub max_chunk_size: usize,

    /// Fake 引擎返回的音频文件，未设置时返回静音数据
    #[serde(default)]
    pub fake_audio_path: Option<String>,
}

fn default_tts_base_url() -> String {
    "https://api.deepgram.com".to_string()
}

fn default_tts_model() -> String {
    "aura-asteria-en".to_string()
}

fn default_tts_timeout() -> u64 {
    15
}

fn default_chunk_size() -> usize {
    4096
}

fn default_max_chunk_size() -> usize {
    1024 * 1024 // 1 MiB
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            engine: TtsEngineKind::default(),
            base_url: default_tts_base_url(),
            model: default_tts_model(),
            api_key: None,
            timeout_secs: default_tts_timeout(),
            chunk_size: default_chunk_size(),
            max_chunk_size: default_max_chunk_size(),
            fake_audio_path: None,
        }
    }
}

impl std::fmt::Debug for TtsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtsConfig")
            .field("engine", &self.engine)
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("timeout_secs", &self.timeout_secs)
            .field("chunk_size", &self.chunk_size)
            .field("max_chunk_size", &self.max_chunk_size)
            .field("fake_audio_path", &self.fake_audio_path)
            .finish()
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
