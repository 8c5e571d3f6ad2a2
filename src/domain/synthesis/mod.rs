//! Synthesis Context - 语音合成上下文
//!
//! 职责:
//! - 合成请求校验
//! - 固定的音频输出参数

mod errors;
mod value_objects;

pub use errors::{SynthesisError, MISSING_PARAMETERS_MESSAGE};
pub use value_objects::{AudioEncoding, AudioSettings, SynthesisRequest, RECOMMENDED_MAX_CHARS};
