//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::domain::voice::Voice;

// ============================================================================
// Generate
// ============================================================================

/// POST /api/generate 请求体
///
/// 字段缺失时由处理器返回 400
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub voice_name: Option<String>,
    #[serde(default)]
    pub language_code: Option<String>,
}

impl GenerateRequest {
    /// 从任意 JSON 值取字段
    ///
    /// null、false、0 与非对象请求体视为缺失；其他非字符串值取其 JSON 文本
    pub fn from_json(value: &serde_json::Value) -> Self {
        Self {
            text: field(value, "text"),
            voice_name: field(value, "voiceName"),
            language_code: field(value, "languageCode"),
        }
    }
}

fn field(value: &serde_json::Value, key: &str) -> Option<String> {
    use serde_json::Value;

    match value.get(key)? {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// POST /api/generate 成功响应
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub audio_content: String,
    pub success: bool,
}

impl GenerateResponse {
    pub fn success(audio_content: String) -> Self {
        Self {
            audio_content,
            success: true,
        }
    }
}

// ============================================================================
// Voices
// ============================================================================

/// GET /api/voices 查询参数
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoicesQuery {
    #[serde(default)]
    pub language_code: Option<String>,
}

/// GET /api/voices 成功响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoicesResponse {
    pub voices: Vec<Voice>,
}
