//! Fake TTS Client - 用于测试的 TTS 提供方
//!
//! 返回内存中的固定目录和固定音频，不实际调用外部服务

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::application::ports::{ProviderError, TtsProviderPort};
use crate::domain::synthesis::SynthesisRequest;
use crate::domain::voice::{SsmlGender, Voice};

/// 最小的 MPEG 帧头，足以被识别为 MP3
const FAKE_MP3: &[u8] = &[0xFF, 0xFB, 0x90, 0x64, 0x00, 0x00, 0x00, 0x00];

type FailureFn = Box<dyn Fn() -> ProviderError + Send + Sync>;

/// Fake TTS Client
///
/// 记录调用次数，可配置为始终失败
pub struct FakeTtsClient {
    voices: Vec<Voice>,
    audio_data: Vec<u8>,
    failure: Option<FailureFn>,
    list_calls: AtomicUsize,
    synthesize_calls: AtomicUsize,
}

impl Default for FakeTtsClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeTtsClient {
    /// 创建带默认目录的 FakeTtsClient
    pub fn new() -> Self {
        Self {
            voices: default_catalog(),
            audio_data: FAKE_MP3.to_vec(),
            failure: None,
            list_calls: AtomicUsize::new(0),
            synthesize_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_voices(mut self, voices: Vec<Voice>) -> Self {
        self.voices = voices;
        self
    }

    pub fn with_audio(mut self, audio_data: Vec<u8>) -> Self {
        self.audio_data = audio_data;
        self
    }

    /// 所有调用都以给定错误失败
    pub fn failing_with<F>(mut self, failure: F) -> Self
    where
        F: Fn() -> ProviderError + Send + Sync + 'static,
    {
        self.failure = Some(Box::new(failure));
        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn synthesize_calls(&self) -> usize {
        self.synthesize_calls.load(Ordering::SeqCst)
    }

    fn check_failure(&self) -> Result<(), ProviderError> {
        match &self.failure {
            Some(failure) => Err(failure()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl TtsProviderPort for FakeTtsClient {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn list_voices(&self, language_code: Option<&str>) -> Result<Vec<Voice>, ProviderError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;

        Ok(self
            .voices
            .iter()
            .filter(|voice| language_code.map_or(true, |code| voice.supports(code)))
            .cloned()
            .collect())
    }

    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, ProviderError> {
        self.synthesize_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;

        tracing::debug!(
            chars = request.char_count(),
            voice = %request.voice_name(),
            "FakeTtsClient: returning fixed audio"
        );

        if self.audio_data.is_empty() {
            return Err(ProviderError::EmptyAudio);
        }
        Ok(self.audio_data.clone())
    }
}

fn default_catalog() -> Vec<Voice> {
    let voice = |name: &str, lang: &str, gender| Voice::new(name, vec![lang.to_string()], gender, 24000);
    vec![
        voice("en-US-Standard-A", "en-US", SsmlGender::Male),
        voice("en-US-Standard-C", "en-US", SsmlGender::Female),
        voice("en-US-Wavenet-D", "en-US", SsmlGender::Male),
        voice("es-US-Standard-A", "es-US", SsmlGender::Female),
        voice("es-US-Neural2-B", "es-US", SsmlGender::Male),
        voice("he-IL-Standard-A", "he-IL", SsmlGender::Female),
        voice("he-IL-Wavenet-B", "he-IL", SsmlGender::Male),
    ]
}
