//! Voice Context - Voice 实体

use serde::{Deserialize, Serialize};

use super::SsmlGender;

/// 免费音色的命名标记
pub const FREE_TIER_MARKER: &str = "Standard";

/// 提供方音色
///
/// 不变量:
/// - name 非空（由适配器过滤保证）
/// - is_free 由 name 推导，构造后不可单独修改
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voice {
    name: String,
    #[serde(default)]
    language_codes: Vec<String>,
    #[serde(default)]
    ssml_gender: SsmlGender,
    #[serde(default)]
    natural_sample_rate_hertz: u32,
    #[serde(default)]
    is_free: bool,
}

impl Voice {
    pub fn new(
        name: impl Into<String>,
        language_codes: Vec<String>,
        ssml_gender: SsmlGender,
        natural_sample_rate_hertz: u32,
    ) -> Self {
        let name = name.into();
        let is_free = is_free_tier(&name);
        Self {
            name,
            language_codes,
            ssml_gender,
            natural_sample_rate_hertz,
            is_free,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn language_codes(&self) -> &[String] {
        &self.language_codes
    }

    pub fn ssml_gender(&self) -> SsmlGender {
        self.ssml_gender
    }

    pub fn natural_sample_rate_hertz(&self) -> u32 {
        self.natural_sample_rate_hertz
    }

    pub fn is_free(&self) -> bool {
        self.is_free
    }

    /// 是否支持指定语言
    pub fn supports(&self, language_code: &str) -> bool {
        self.language_codes.iter().any(|code| code == language_code)
    }
}

/// 免费档判断：名称中包含 `Standard`
pub fn is_free_tier(name: &str) -> bool {
    name.contains(FREE_TIER_MARKER)
}
