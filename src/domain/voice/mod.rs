//! Voice Context - 音色限界上下文
//!
//! 职责:
//! - 提供方音色的规范化表示
//! - 免费档推导
//! - 可选语言列表

mod aggregate;
mod value_objects;

pub use aggregate::{is_free_tier, Voice, FREE_TIER_MARKER};
pub use value_objects::{
    language_name, LanguageOption, SsmlGender, DEFAULT_LANGUAGE, SUPPORTED_LANGUAGES,
};
