//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（TtsProvider）
//! - commands: 语音合成命令及处理器
//! - queries: 音色目录查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    handlers::{SynthesizeSpeechHandler, SynthesizeSpeechResponse},
    SynthesizeSpeech,
};

pub use error::ApplicationError;

pub use ports::{ProviderError, TtsProviderPort};

pub use queries::{handlers::ListVoicesHandler, ListVoices};
