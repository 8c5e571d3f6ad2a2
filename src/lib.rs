//! Habla - 文本转语音网关与客户端
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Voice Context: 音色目录、语言选项
//! - Synthesis Context: 合成请求校验、固定音频参数
//!
//! 应用层 (application/):
//! - Ports: TtsProviderPort
//! - Commands: SynthesizeSpeech
//! - Queries: ListVoices
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: /api/generate, /api/voices, /api/health
//! - Adapters: Google Cloud TTS 客户端、凭据解析、Fake 客户端
//!
//! 客户端 (client/):
//! - 编排状态机、HTTP API、音频播放

pub mod application;
pub mod client;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
