//! HTTP Routes
//!
//! API Endpoints:
//! - /api/health    GET   健康检查
//! - /api/voices    GET   音色目录（可选 languageCode 过滤）
//! - /api/generate  POST  合成语音，返回 base64 音频

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/voices", get(handlers::list_voices))
        .route("/generate", post(handlers::generate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{ProviderError, TtsProviderPort};
    use crate::domain::synthesis::MISSING_PARAMETERS_MESSAGE;
    use crate::infrastructure::adapters::FakeTtsClient;
    use crate::infrastructure::http::error::messages;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use axum::response::Response;
    use base64::Engine;
    use tower::util::ServiceExt;

    async fn read_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn app(provider: Arc<FakeTtsClient>) -> Router {
        let provider: Arc<dyn TtsProviderPort> = provider;
        create_routes().with_state(Arc::new(AppState::new(provider)))
    }

    fn generate_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/generate")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_generate_success() {
        let provider = Arc::new(FakeTtsClient::new());
        let response = app(provider.clone())
            .oneshot(generate_request(
                r#"{"text":"Hello world","voiceName":"en-US-Standard-A","languageCode":"en-US"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = read_json(response).await;
        assert_eq!(json["success"], true);

        let encoded = json["audioContent"].as_str().unwrap();
        let audio = base64::engine::general_purpose::STANDARD.decode(encoded).unwrap();
        assert!(!audio.is_empty());
        assert_eq!(provider.synthesize_calls(), 1);
    }

    #[tokio::test]
    async fn test_generate_empty_fields() {
        let provider = Arc::new(FakeTtsClient::new());
        let response = app(provider.clone())
            .oneshot(generate_request(r#"{"text":"","voiceName":"","languageCode":""}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = read_json(response).await;
        assert_eq!(json["error"], MISSING_PARAMETERS_MESSAGE);
        assert_eq!(provider.synthesize_calls(), 0);
    }

    #[tokio::test]
    async fn test_generate_missing_fields_never_reach_provider() {
        let provider = Arc::new(FakeTtsClient::new());
        let bodies = [
            r#"{}"#,
            r#"{"voiceName":"en-US-Standard-A","languageCode":"en-US"}"#,
            r#"{"text":"hi","languageCode":"en-US"}"#,
            r#"{"text":"hi","voiceName":"en-US-Standard-A"}"#,
            r#"{"text":null,"voiceName":false,"languageCode":0}"#,
            r#"["hi"]"#,
        ];

        for body in bodies {
            let response = app(provider.clone()).oneshot(generate_request(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
            let json = read_json(response).await;
            assert!(!json["error"].as_str().unwrap().is_empty());
        }
        assert_eq!(provider.synthesize_calls(), 0);
    }

    #[tokio::test]
    async fn test_generate_ignores_content_type() {
        let provider = Arc::new(FakeTtsClient::new());
        let request = Request::builder()
            .method("POST")
            .uri("/api/generate")
            .header(header::CONTENT_TYPE, "text/plain;charset=UTF-8")
            .body(Body::from(
                r#"{"text":"Hello","voiceName":"en-US-Standard-A","languageCode":"en-US"}"#,
            ))
            .unwrap();

        let response = app(provider.clone()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = read_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(provider.synthesize_calls(), 1);
    }

    #[tokio::test]
    async fn test_generate_malformed_body_is_generic_failure() {
        let provider = Arc::new(FakeTtsClient::new());
        for body in ["not json", "", r#"{"text":"hi""#] {
            let response = app(provider.clone()).oneshot(generate_request(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR, "body: {body}");
            let json = read_json(response).await;
            assert_eq!(json["error"], messages::GENERATE_FAILED);
        }
        assert_eq!(provider.synthesize_calls(), 0);
    }

    #[tokio::test]
    async fn test_generate_provider_failure_is_generic() {
        let provider = Arc::new(FakeTtsClient::new().failing_with(|| {
            ProviderError::Authentication("Could not load the default credentials".into())
        }));
        let response = app(provider)
            .oneshot(generate_request(
                r#"{"text":"Hello","voiceName":"en-US-Standard-A","languageCode":"en-US"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = read_json(response).await;
        assert_eq!(json["error"], messages::GENERATE_FAILED);
        assert!(!json.to_string().contains("credentials"));
    }

    #[tokio::test]
    async fn test_voices_filtered_by_language() {
        let provider = Arc::new(FakeTtsClient::new());
        let response = app(provider)
            .oneshot(get_request("/api/voices?languageCode=he-IL"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = read_json(response).await;
        let voices = json["voices"].as_array().unwrap();
        assert!(!voices.is_empty());
        for voice in voices {
            let codes: Vec<&str> = voice["languageCodes"]
                .as_array()
                .unwrap()
                .iter()
                .filter_map(|c| c.as_str())
                .collect();
            assert!(codes.contains(&"he-IL"));
            assert!(!voice["name"].as_str().unwrap().is_empty());
            assert!(voice["ssmlGender"].is_string());
        }
    }

    #[tokio::test]
    async fn test_voices_without_filter() {
        let provider = Arc::new(FakeTtsClient::new());
        let response = app(provider).oneshot(get_request("/api/voices")).await.unwrap();

        let json = read_json(response).await;
        assert_eq!(json["voices"].as_array().unwrap().len(), 7);
    }

    #[tokio::test]
    async fn test_voices_failure_is_generic() {
        let provider = Arc::new(
            FakeTtsClient::new().failing_with(|| ProviderError::Api {
                status: 429,
                message: "Quota exceeded for quota metric".into(),
            }),
        );
        let response = app(provider)
            .oneshot(get_request("/api/voices?languageCode=en-US"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = read_json(response).await;
        assert_eq!(json["error"], messages::VOICES_FAILED);
    }

    #[tokio::test]
    async fn test_health() {
        let provider = Arc::new(FakeTtsClient::new());
        let response = app(provider).oneshot(get_request("/api/health")).await.unwrap();

        let json = read_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["provider"], "fake");
    }
}
