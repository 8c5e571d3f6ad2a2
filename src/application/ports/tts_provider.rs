//! TTS Provider Port - 外部语音合成服务抽象
//!
//! 定义音色目录和语音合成的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::synthesis::SynthesisRequest;
use crate::domain::voice::Voice;

/// 提供方错误
///
/// 详细信息只用于服务端日志，不会返回给客户端
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Provider API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// 请求被接受但没有返回音频
    #[error("Provider returned no audio content")]
    EmptyAudio,
}

impl ProviderError {
    pub fn is_empty_audio(&self) -> bool {
        matches!(self, Self::EmptyAudio)
    }
}

/// TTS Provider Port
///
/// 外部 TTS 服务的抽象接口
#[async_trait]
pub trait TtsProviderPort: Send + Sync {
    /// 提供方名称（日志、健康检查）
    fn name(&self) -> &'static str;

    /// 列出音色
    ///
    /// `language_code` 为 None 时返回完整目录
    async fn list_voices(&self, language_code: Option<&str>) -> Result<Vec<Voice>, ProviderError>;

    /// 合成语音，返回原始音频字节（MP3）
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, ProviderError>;
}
