//! HTTP Error Handling
//!
//! 错误信封 `{ "error": "..." }`，状态码如实返回（400 / 500）

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// 通用错误提示（不暴露提供方细节）
pub mod messages {
    pub const GENERATE_FAILED: &str = "Error al generar el audio";
    pub const VOICES_FAILED: &str = "Error al obtener las voces disponibles";
}

/// 统一错误响应格式
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    /// 客户端原因（参数缺失等）
    BadRequest(String),
    /// 服务端原因，消息为已经脱敏的通用提示
    Internal(String),
}

impl ApiError {
    /// 将应用层错误转换为 API 错误
    ///
    /// 提供方错误只记录日志，响应体使用 `public_message`
    pub fn from_application(err: ApplicationError, public_message: &str) -> Self {
        match err {
            ApplicationError::Validation(e) => ApiError::BadRequest(e.public_message().to_string()),
            ApplicationError::Provider(e) => {
                tracing::error!(error = %e, "Provider call failed");
                ApiError::Internal(public_message.to_string())
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::BadRequest(msg) => {
                tracing::warn!(status = status.as_u16(), error = %msg, "Bad request");
                msg
            }
            ApiError::Internal(msg) => {
                tracing::error!(status = status.as_u16(), error = %msg, "Internal server error");
                msg
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
