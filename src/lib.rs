//! speakrelay - Deepgram 流式语音合成中继
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Speech Context: 文本、音色模型、块大小值对象；固定块大小的音频重分块流
//!
//! 应用层 (application/):
//! - Ports: TtsEngine 端口
//! - Commands: SynthesizeSpeech 命令处理器
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: Deepgram TTS Client, Fake TTS Client
//! - HTTP: 流式合成中继 API

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
