//! Voice HTTP Handlers

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::application::ListVoices;
use crate::infrastructure::http::dto::{VoicesQuery, VoicesResponse};
use crate::infrastructure::http::error::{messages, ApiError};
use crate::infrastructure::http::state::AppState;

/// 获取音色列表
pub async fn list_voices(
    State(state): State<Arc<AppState>>,
    Query(query): Query<VoicesQuery>,
) -> Result<Json<VoicesResponse>, ApiError> {
    let voices = state
        .list_voices_handler
        .handle(ListVoices {
            language_code: query.language_code,
        })
        .await
        .map_err(|e| ApiError::from_application(e, messages::VOICES_FAILED))?;

    Ok(Json(VoicesResponse { voices }))
}
