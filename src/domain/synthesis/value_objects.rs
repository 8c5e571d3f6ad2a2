//! Synthesis Context - Value Objects

use serde::Serialize;

use super::SynthesisError;

/// 建议的最大文本长度（字符），仅作提示，不做强制
pub const RECOMMENDED_MAX_CHARS: usize = 5000;

/// 合成请求
///
/// 不变量:
/// - text、voice_name、language_code 均非空
/// - voice_name 是否属于 language_code 的目录不在此校验
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    text: String,
    voice_name: String,
    language_code: String,
}

impl SynthesisRequest {
    pub fn new(
        text: impl Into<String>,
        voice_name: impl Into<String>,
        language_code: impl Into<String>,
    ) -> Result<Self, SynthesisError> {
        let text = text.into();
        let voice_name = voice_name.into();
        let language_code = language_code.into();

        let missing: Vec<&'static str> = [
            ("text", text.is_empty()),
            ("voiceName", voice_name.is_empty()),
            ("languageCode", language_code.is_empty()),
        ]
        .into_iter()
        .filter_map(|(field, empty)| empty.then_some(field))
        .collect();

        if !missing.is_empty() {
            return Err(SynthesisError::MissingParameters { missing });
        }

        Ok(Self {
            text,
            voice_name,
            language_code,
        })
    }

    /// 从可选字段构造（HTTP 请求体中字段可能缺失）
    pub fn from_parts(
        text: Option<String>,
        voice_name: Option<String>,
        language_code: Option<String>,
    ) -> Result<Self, SynthesisError> {
        Self::new(
            text.unwrap_or_default(),
            voice_name.unwrap_or_default(),
            language_code.unwrap_or_default(),
        )
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn voice_name(&self) -> &str {
        &self.voice_name
    }

    pub fn language_code(&self) -> &str {
        &self.language_code
    }

    /// 文本字符数
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn exceeds_recommended_length(&self) -> bool {
        self.char_count() > RECOMMENDED_MAX_CHARS
    }
}

/// 音频编码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AudioEncoding {
    Mp3,
}

impl AudioEncoding {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
        }
    }
}

/// 固定的合成参数
///
/// 语速 1.0、音调 0、增益 0 dB、采样率 24000 Hz，调用方不可修改
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioSettings {
    pub encoding: AudioEncoding,
    pub speaking_rate: f64,
    pub pitch: f64,
    pub volume_gain_db: f64,
    pub sample_rate_hertz: u32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            encoding: AudioEncoding::Mp3,
            speaking_rate: 1.0,
            pitch: 0.0,
            volume_gain_db: 0.0,
            sample_rate_hertz: 24000,
        }
    }
}
