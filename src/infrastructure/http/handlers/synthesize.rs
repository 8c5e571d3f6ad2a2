//! Synthesize HTTP Handler

use axum::{body::Bytes, extract::State, Json};
use std::sync::Arc;

use crate::application::SynthesizeSpeech;
use crate::infrastructure::http::dto::{GenerateRequest, GenerateResponse};
use crate::infrastructure::http::error::{messages, ApiError};
use crate::infrastructure::http::state::AppState;

/// 合成语音
///
/// 不检查 Content-Type，请求体总是按 JSON 解析；无法解析时返回 500
pub async fn generate(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<GenerateResponse>, ApiError> {
    let value: serde_json::Value = serde_json::from_slice(&body).map_err(|e| {
        tracing::error!(error = %e, "Failed to parse generate body");
        ApiError::Internal(messages::GENERATE_FAILED.to_string())
    })?;
    let req = GenerateRequest::from_json(&value);

    let command = SynthesizeSpeech {
        text: req.text,
        voice_name: req.voice_name,
        language_code: req.language_code,
    };

    let result = state
        .synthesize_handler
        .handle(command)
        .await
        .map_err(|e| ApiError::from_application(e, messages::GENERATE_FAILED))?;

    Ok(Json(GenerateResponse::success(result.audio_content)))
}
