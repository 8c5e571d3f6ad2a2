//! Voice Queries

/// 列出音色查询
#[derive(Debug, Clone, Default)]
pub struct ListVoices {
    /// 语言过滤；None 或空字符串表示完整目录
    pub language_code: Option<String>,
}

impl ListVoices {
    pub fn for_language(language_code: impl Into<String>) -> Self {
        Self {
            language_code: Some(language_code.into()),
        }
    }

    /// 规范化后的过滤条件
    pub fn filter(&self) -> Option<&str> {
        self.language_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
    }
}
