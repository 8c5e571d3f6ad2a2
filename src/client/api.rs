//! Client API - 调用 habla 服务端的 HTTP 客户端
//!
//! GET  {server}/api/voices?languageCode=...
//! POST {server}/api/generate  {"text", "voiceName", "languageCode"}

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use crate::domain::synthesis::SynthesisRequest;
use crate::domain::voice::Voice;
use crate::infrastructure::http::dto::{GenerateRequest, GenerateResponse, VoicesResponse};
use crate::infrastructure::http::error::{messages, ErrorResponse};

/// 客户端错误
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),

    /// 服务端返回的错误信封 `{"error": ...}`
    #[error("{0}")]
    Server(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ClientError {
    /// 展示给用户的消息
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Server(message) if !message.trim().is_empty() => message.clone(),
            ClientError::Server(_) | ClientError::Decode(_) => messages::GENERATE_FAILED.to_string(),
            ClientError::Network(message) => message.clone(),
        }
    }
}

/// 服务端 API 抽象
#[async_trait]
pub trait TtsApi: Send + Sync {
    /// 获取某个语言的音色目录
    async fn fetch_voices(&self, language_code: &str) -> Result<Vec<Voice>, ClientError>;

    /// 合成语音，返回 base64 编码的音频
    async fn generate(&self, request: &SynthesisRequest) -> Result<String, ClientError>;
}

/// 基于 reqwest 的服务端客户端
#[derive(Debug, Clone)]
pub struct HttpTtsApi {
    client: Client,
    base_url: String,
}

impl HttpTtsApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = Client::builder()
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn voices_url(&self) -> String {
        format!("{}/api/voices", self.base_url)
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }
}

fn network_error(err: reqwest::Error) -> ClientError {
    if err.is_connect() {
        ClientError::Network(format!("Cannot connect to server: {}", err))
    } else {
        ClientError::Network(err.to_string())
    }
}

/// 非 2xx 响应：读取错误信封，读不到时退回状态码
async fn server_error(response: reqwest::Response) -> ClientError {
    let status = response.status();
    match response.json::<ErrorResponse>().await {
        Ok(body) => ClientError::Server(body.error),
        Err(_) => ClientError::Server(format!("HTTP {}", status)),
    }
}

#[async_trait]
impl TtsApi for HttpTtsApi {
    async fn fetch_voices(&self, language_code: &str) -> Result<Vec<Voice>, ClientError> {
        tracing::debug!(url = %self.voices_url(), language_code, "Fetching voices");

        let response = self
            .client
            .get(self.voices_url())
            .query(&[("languageCode", language_code)])
            .send()
            .await
            .map_err(network_error)?;

        if !response.status().is_success() {
            return Err(server_error(response).await);
        }

        let body: VoicesResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;

        Ok(body.voices)
    }

    async fn generate(&self, request: &SynthesisRequest) -> Result<String, ClientError> {
        let body = GenerateRequest {
            text: Some(request.text().to_string()),
            voice_name: Some(request.voice_name().to_string()),
            language_code: Some(request.language_code().to_string()),
        };

        tracing::debug!(
            url = %self.generate_url(),
            voice = request.voice_name(),
            chars = request.char_count(),
            "Requesting speech synthesis"
        );

        let response = self
            .client
            .post(self.generate_url())
            .json(&body)
            .send()
            .await
            .map_err(network_error)?;

        if !response.status().is_success() {
            return Err(server_error(response).await);
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;

        if !body.success || body.audio_content.is_empty() {
            return Err(ClientError::Server(messages::GENERATE_FAILED.to_string()));
        }

        Ok(body.audio_content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{ProviderError, TtsProviderPort};
    use crate::infrastructure::adapters::FakeTtsClient;
    use crate::infrastructure::http::{create_routes, AppState};
    use std::sync::Arc;

    /// 在 127.0.0.1:0 上启动带 FakeTtsClient 的服务端
    async fn spawn_server(provider: FakeTtsClient) -> String {
        let provider: Arc<dyn TtsProviderPort> = Arc::new(provider);
        let router = create_routes().with_state(Arc::new(AppState::new(provider)));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_fetch_voices() {
        let server = spawn_server(FakeTtsClient::new()).await;
        let api = HttpTtsApi::new(server).unwrap();

        let voices = api.fetch_voices("es-US").await.unwrap();
        assert!(!voices.is_empty());
        assert!(voices.iter().all(|v| v.supports("es-US")));
    }

    #[tokio::test]
    async fn test_generate_returns_base64_audio() {
        let server = spawn_server(FakeTtsClient::new().with_audio(vec![0xFF, 0xFB, 0x90, 0x00])).await;
        let api = HttpTtsApi::new(format!("{}/", server)).unwrap();

        let request = SynthesisRequest::new("Hello world", "en-US-Standard-A", "en-US").unwrap();
        let audio = api.generate(&request).await.unwrap();
        assert_eq!(audio, "//uQAA==");
    }

    #[tokio::test]
    async fn test_server_error_envelope() {
        let server = spawn_server(
            FakeTtsClient::new().failing_with(|| ProviderError::Network("reset".into())),
        )
        .await;
        let api = HttpTtsApi::new(server).unwrap();

        let request = SynthesisRequest::new("Hola", "es-US-Standard-A", "es-US").unwrap();
        let err = api.generate(&request).await.unwrap_err();
        assert!(matches!(err, ClientError::Server(_)));
        assert_eq!(err.user_message(), messages::GENERATE_FAILED);

        let err = api.fetch_voices("es-US").await.unwrap_err();
        assert_eq!(err.user_message(), messages::VOICES_FAILED);
    }

    #[tokio::test]
    async fn test_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = HttpTtsApi::new(format!("http://{}", addr)).unwrap();
        let err = api.fetch_voices("en-US").await.unwrap_err();
        assert!(matches!(err, ClientError::Network(_)));
    }
}
