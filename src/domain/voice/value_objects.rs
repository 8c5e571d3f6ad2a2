//! Voice Context - Value Objects

use serde::{Deserialize, Serialize};

/// SSML 性别分类
///
/// 线上格式与 Google TTS 一致：`MALE` / `FEMALE` / `NEUTRAL` /
/// `SSML_VOICE_GENDER_UNSPECIFIED`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SsmlGender {
    #[serde(rename = "MALE")]
    Male,
    #[serde(rename = "FEMALE")]
    Female,
    #[serde(rename = "NEUTRAL")]
    Neutral,
    #[default]
    #[serde(rename = "SSML_VOICE_GENDER_UNSPECIFIED")]
    Unspecified,
}

impl SsmlGender {
    /// 从提供方字符串解析，未知值归为 Unspecified
    pub fn from_provider(value: &str) -> Self {
        match value {
            "MALE" => Self::Male,
            "FEMALE" => Self::Female,
            "NEUTRAL" => Self::Neutral,
            _ => Self::Unspecified,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "MALE",
            Self::Female => "FEMALE",
            Self::Neutral => "NEUTRAL",
            Self::Unspecified => "SSML_VOICE_GENDER_UNSPECIFIED",
        }
    }
}

impl std::fmt::Display for SsmlGender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 语言选择器中的一项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageOption {
    pub code: &'static str,
    pub name: &'static str,
}

/// 可选语言（按选择器顺序）
pub const SUPPORTED_LANGUAGES: &[LanguageOption] = &[
    LanguageOption {
        code: "es-US",
        name: "Spanish (America)",
    },
    LanguageOption {
        code: "en-US",
        name: "English (US)",
    },
    LanguageOption {
        code: "he-IL",
        name: "Hebrew (Israel)",
    },
];

/// 初次挂载时的默认语言
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// 查找语言显示名
pub fn language_name(code: &str) -> Option<&'static str> {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|lang| lang.code == code)
        .map(|lang| lang.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_wire_names() {
        assert_eq!(
            serde_json::to_string(&SsmlGender::Unspecified).unwrap(),
            "\"SSML_VOICE_GENDER_UNSPECIFIED\""
        );
        assert_eq!(
            serde_json::from_str::<SsmlGender>("\"FEMALE\"").unwrap(),
            SsmlGender::Female
        );
    }

    #[test]
    fn test_unknown_gender_is_unspecified() {
        assert_eq!(SsmlGender::from_provider("ROBOT"), SsmlGender::Unspecified);
        assert_eq!(SsmlGender::from_provider("NEUTRAL"), SsmlGender::Neutral);
    }

    #[test]
    fn test_language_lookup() {
        assert_eq!(language_name("he-IL"), Some("Hebrew (Israel)"));
        assert_eq!(language_name("fr-FR"), None);
        assert!(SUPPORTED_LANGUAGES.iter().any(|l| l.code == DEFAULT_LANGUAGE));
    }
}
