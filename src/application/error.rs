//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::ProviderError;
use crate::domain::synthesis::SynthesisError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 请求参数校验失败（客户端原因）
    #[error("Validation error: {0}")]
    Validation(#[from] SynthesisError),

    /// 外部提供方失败（服务端原因）
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

impl ApplicationError {
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
