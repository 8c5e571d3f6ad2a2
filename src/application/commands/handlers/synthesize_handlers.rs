//! Synthesize Command Handlers

use base64::Engine;
use std::sync::Arc;

use crate::application::commands::SynthesizeSpeech;
use crate::application::error::ApplicationError;
use crate::application::ports::TtsProviderPort;
use crate::domain::synthesis::SynthesisRequest;

/// 合成结果
#[derive(Debug, Clone)]
pub struct SynthesizeSpeechResponse {
    /// base64 编码（标准字母表，带填充）的音频
    pub audio_content: String,
    /// 解码后的字节数
    pub audio_size: usize,
}

/// SynthesizeSpeech Handler
pub struct SynthesizeSpeechHandler {
    provider: Arc<dyn TtsProviderPort>,
}

impl SynthesizeSpeechHandler {
    pub fn new(provider: Arc<dyn TtsProviderPort>) -> Self {
        Self { provider }
    }

    pub async fn handle(
        &self,
        command: SynthesizeSpeech,
    ) -> Result<SynthesizeSpeechResponse, ApplicationError> {
        let request =
            SynthesisRequest::from_parts(command.text, command.voice_name, command.language_code)?;

        if request.exceeds_recommended_length() {
            tracing::warn!(
                chars = request.char_count(),
                "Text exceeds recommended length, sending anyway"
            );
        }

        let audio = self.provider.synthesize(&request).await?;
        let audio_content = base64::engine::general_purpose::STANDARD.encode(&audio);

        tracing::info!(
            provider = self.provider.name(),
            voice = %request.voice_name(),
            language = %request.language_code(),
            chars = request.char_count(),
            audio_size = audio.len(),
            "Speech synthesized"
        );

        Ok(SynthesizeSpeechResponse {
            audio_content,
            audio_size: audio.len(),
        })
    }
}
