//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Voice Context: 提供方音色目录
//! - Synthesis Context: 合成请求与音频参数

pub mod synthesis;
pub mod voice;
