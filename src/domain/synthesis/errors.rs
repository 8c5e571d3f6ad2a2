//! Synthesis Context - Errors

use thiserror::Error;

/// 缺少参数时返回给调用方的固定提示
pub const MISSING_PARAMETERS_MESSAGE: &str =
    "Faltan parámetros requeridos: text, voiceName, languageCode";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthesisError {
    /// text / voiceName / languageCode 任一缺失或为空
    #[error("Faltan parámetros requeridos: text, voiceName, languageCode (missing: {})", .missing.join(", "))]
    MissingParameters { missing: Vec<&'static str> },
}

impl SynthesisError {
    /// 面向客户端的提示（不含内部细节）
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::MissingParameters { .. } => MISSING_PARAMETERS_MESSAGE,
        }
    }
}
