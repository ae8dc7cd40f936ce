//! Speech Commands - 语音合成命令

/// 合成语音命令
///
/// 原始输入，由 SynthesizeSpeechHandler 校验后转换为领域值对象
#[derive(Debug, Clone)]
pub struct SynthesizeSpeech {
    pub text: String,
    /// 音色模型，None 时使用引擎默认值
    pub voice_model: Option<String>,
    /// 输出块大小（字节），None 时使用配置的默认值
    pub chunk_size: Option<usize>,
}

impl SynthesizeSpeech {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice_model: None,
            chunk_size: None,
        }
    }
}
