//! Synthesize Commands

/// 合成语音命令
///
/// 字段保持可选：缺失与空字符串一样由处理器判定为校验失败
#[derive(Debug, Clone, Default)]
pub struct SynthesizeSpeech {
    pub text: Option<String>,
    pub voice_name: Option<String>,
    pub language_code: Option<String>,
}

impl SynthesizeSpeech {
    pub fn new(
        text: impl Into<String>,
        voice_name: impl Into<String>,
        language_code: impl Into<String>,
    ) -> Self {
        Self {
            text: Some(text.into()),
            voice_name: Some(voice_name.into()),
            language_code: Some(language_code.into()),
        }
    }
}
