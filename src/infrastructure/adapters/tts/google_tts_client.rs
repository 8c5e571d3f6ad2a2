//! Google TTS Client - 调用 Google Cloud Text-to-Speech REST API
//!
//! 实现 TtsProviderPort trait
//!
//! 外部 API:
//! GET  {base_url}/v1/voices[?languageCode=xx-XX]
//! POST {base_url}/v1/text:synthesize
//! Request:  {"input": {"text"}, "voice": {"languageCode", "name"}, "audioConfig": {...}}
//! Response: {"audioContent": "<base64>"}

use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{ProviderError, TtsProviderPort};
use crate::domain::synthesis::{AudioEncoding, AudioSettings, SynthesisRequest};
use crate::domain::voice::{SsmlGender, Voice};
use crate::infrastructure::adapters::credentials::{
    self, AuthEndpoints, CredentialSettings, CredentialSource, GoogleTokenProvider,
};

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Deserialize)]
struct ListVoicesResponse {
    #[serde(default)]
    voices: Vec<GoogleVoice>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleVoice {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    language_codes: Option<Vec<String>>,
    #[serde(default)]
    ssml_gender: Option<String>,
    #[serde(default)]
    natural_sample_rate_hertz: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeBody<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceSelection<'a>,
    audio_config: AudioConfigBody,
}

#[derive(Debug, Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelection<'a> {
    language_code: &'a str,
    name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfigBody {
    audio_encoding: AudioEncoding,
    speaking_rate: f64,
    pitch: f64,
    volume_gain_db: f64,
    sample_rate_hertz: u32,
}

impl From<AudioSettings> for AudioConfigBody {
    fn from(settings: AudioSettings) -> Self {
        Self {
            audio_encoding: settings.encoding,
            speaking_rate: settings.speaking_rate,
            pitch: settings.pitch,
            volume_gain_db: settings.volume_gain_db,
            sample_rate_hertz: settings.sample_rate_hertz,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    #[serde(default)]
    audio_content: Option<String>,
}

// ============================================================================
// Client
// ============================================================================

/// Google TTS 客户端配置
#[derive(Debug, Clone)]
pub struct GoogleTtsClientConfig {
    /// API 基础 URL
    pub base_url: String,
    /// 请求超时时间（秒），0 表示不设超时
    pub timeout_secs: u64,
    /// 凭据解析设置
    pub credentials: CredentialSettings,
    /// OAuth2 端点
    pub auth: AuthEndpoints,
}

impl Default for GoogleTtsClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://texttospeech.googleapis.com".to_string(),
            timeout_secs: 0,
            credentials: CredentialSettings::default(),
            auth: AuthEndpoints::default(),
        }
    }
}

/// Google TTS 客户端
pub struct GoogleTtsClient {
    client: Client,
    config: GoogleTtsClientConfig,
    tokens: GoogleTokenProvider,
    audio: AudioSettings,
}

impl GoogleTtsClient {
    /// 创建客户端，凭据来源在此时解析
    pub fn new(config: GoogleTtsClientConfig) -> Result<Self, ProviderError> {
        let source = credentials::resolve(&config.credentials);
        Self::with_credentials(config, source)
    }

    /// 使用已解析的凭据来源创建客户端
    pub fn with_credentials(
        config: GoogleTtsClientConfig,
        source: CredentialSource,
    ) -> Result<Self, ProviderError> {
        let mut builder = Client::builder();
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let client = builder
            .build()
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        tracing::info!(
            base_url = %config.base_url,
            credentials = %source.describe(),
            "Google TTS client initialized"
        );

        let tokens = GoogleTokenProvider::new(client.clone(), source, config.auth.clone());

        Ok(Self {
            client,
            config,
            tokens,
            audio: AudioSettings::default(),
        })
    }

    fn voices_url(&self) -> String {
        format!("{}/v1/voices", self.config.base_url.trim_end_matches('/'))
    }

    fn synthesize_url(&self) -> String {
        format!("{}/v1/text:synthesize", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl TtsProviderPort for GoogleTtsClient {
    fn name(&self) -> &'static str {
        "google"
    }

    async fn list_voices(&self, language_code: Option<&str>) -> Result<Vec<Voice>, ProviderError> {
        let token = self.tokens.access_token().await?;

        let mut request = self.client.get(self.voices_url()).bearer_auth(token);
        // 无过滤时完全省略该参数
        if let Some(code) = language_code.filter(|c| !c.is_empty()) {
            request = request.query(&[("languageCode", code)]);
        }

        tracing::debug!(url = %self.voices_url(), language = ?language_code, "Listing voices");

        let response = request.send().await.map_err(map_send_error)?;
        let response = check_status(response).await?;

        let body: ListVoicesResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("Failed to parse voices: {}", e)))?;

        Ok(normalize_voices(body.voices))
    }

    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, ProviderError> {
        let token = self.tokens.access_token().await?;

        let body = SynthesizeBody {
            input: SynthesisInput {
                text: request.text(),
            },
            voice: VoiceSelection {
                language_code: request.language_code(),
                name: request.voice_name(),
            },
            audio_config: self.audio.into(),
        };

        tracing::debug!(
            url = %self.synthesize_url(),
            text_len = request.text().len(),
            voice = %request.voice_name(),
            "Sending synthesize request"
        );

        let response = self
            .client
            .post(self.synthesize_url())
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(map_send_error)?;
        let response = check_status(response).await?;

        let body: SynthesizeResponse = response.json().await.map_err(|e| {
            ProviderError::InvalidResponse(format!("Failed to parse synthesize response: {}", e))
        })?;

        let encoded = body
            .audio_content
            .filter(|content| !content.is_empty())
            .ok_or(ProviderError::EmptyAudio)?;

        let audio = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| ProviderError::InvalidResponse(format!("Invalid audio encoding: {}", e)))?;

        if audio.is_empty() {
            return Err(ProviderError::EmptyAudio);
        }

        tracing::info!(audio_size = audio.len(), "Google TTS synthesis completed");
        Ok(audio)
    }
}

fn map_send_error(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Network("Request timeout".to_string())
    } else if e.is_connect() {
        ProviderError::Network(format!("Cannot connect to TTS provider: {}", e))
    } else {
        ProviderError::Network(e.to_string())
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(ProviderError::Authentication(format!("HTTP {}: {}", status, message)));
    }
    Err(ProviderError::Api {
        status: status.as_u16(),
        message,
    })
}

/// 过滤缺少名称或性别的记录，其余字段缺失时取默认值
fn normalize_voices(voices: Vec<GoogleVoice>) -> Vec<Voice> {
    voices
        .into_iter()
        .filter_map(|voice| {
            let name = voice.name.filter(|n| !n.is_empty())?;
            let gender = voice.ssml_gender.filter(|g| !g.is_empty())?;
            Some(Voice::new(
                name,
                voice.language_codes.unwrap_or_default(),
                SsmlGender::from_provider(&gender),
                voice.natural_sample_rate_hertz.unwrap_or(0),
            ))
        })
        .collect()
}
