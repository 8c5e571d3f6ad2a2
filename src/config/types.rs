//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

use crate::infrastructure::adapters::credentials::{AuthEndpoints, CredentialSettings};
use crate::infrastructure::adapters::GoogleTtsClientConfig;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// TTS 提供方配置
    #[serde(default)]
    pub provider: ProviderConfig,

    /// 凭据配置
    #[serde(default)]
    pub credentials: CredentialsConfig,

    /// 运行环境
    #[serde(default)]
    pub environment: RunMode,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

impl AppConfig {
    /// 转换为 Google TTS 客户端配置
    pub fn google_tts_config(&self) -> GoogleTtsClientConfig {
        GoogleTtsClientConfig {
            base_url: self.provider.base_url.clone(),
            timeout_secs: self.provider.timeout_secs,
            credentials: CredentialSettings {
                env_var: self.credentials.env_var.clone(),
                development: self.environment.is_development(),
                local_file: self.credentials.local_file.clone(),
            },
            auth: AuthEndpoints {
                token_url: self.credentials.token_url.clone(),
                metadata_url: self.credentials.metadata_url.clone(),
            },
        }
    }
}

/// 运行环境
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// 开发模式：允许读取本地凭据文件
    Development,
    #[default]
    Production,
}

impl RunMode {
    pub fn is_development(&self) -> bool {
        matches!(self, RunMode::Development)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunMode::Development => "development",
            RunMode::Production => "production",
        }
    }
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// TTS 提供方配置
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Cloud Text-to-Speech API 地址
    #[serde(default = "default_provider_url")]
    pub base_url: String,

    /// 请求超时（秒），0 表示不设超时
    #[serde(default)]
    pub timeout_secs: u64,
}

fn default_provider_url() -> String {
    "https://texttospeech.googleapis.com".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_provider_url(),
            timeout_secs: 0,
        }
    }
}

/// 凭据配置
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsConfig {
    /// 存放 JSON 凭据的环境变量名
    #[serde(default = "default_env_var")]
    pub env_var: String,

    /// 开发模式下读取的本地凭据文件
    #[serde(default = "default_local_file")]
    pub local_file: PathBuf,

    /// OAuth2 token 端点
    #[serde(default = "default_token_url")]
    pub token_url: String,

    /// GCE metadata server token 端点
    #[serde(default = "default_metadata_url")]
    pub metadata_url: String,
}

fn default_env_var() -> String {
    CredentialSettings::default().env_var
}

fn default_local_file() -> PathBuf {
    CredentialSettings::default().local_file
}

fn default_token_url() -> String {
    AuthEndpoints::default().token_url
}

fn default_metadata_url() -> String {
    AuthEndpoints::default().metadata_url
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            env_var: default_env_var(),
            local_file: default_local_file(),
            token_url: default_token_url(),
            metadata_url: default_metadata_url(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否输出 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.addr(), "0.0.0.0:3000");
        assert_eq!(config.provider.timeout_secs, 0);
        assert_eq!(config.environment, RunMode::Production);
        assert_eq!(config.credentials.env_var, "GOOGLE_APPLICATION_CREDENTIALS_JSON");
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_google_tts_config_mapping() {
        let mut config = AppConfig::default();
        config.environment = RunMode::Development;
        config.provider.base_url = "http://127.0.0.1:9000".to_string();
        config.provider.timeout_secs = 30;
        config.credentials.local_file = PathBuf::from("/tmp/creds.json");

        let tts = config.google_tts_config();
        assert_eq!(tts.base_url, "http://127.0.0.1:9000");
        assert_eq!(tts.timeout_secs, 30);
        assert!(tts.credentials.development);
        assert_eq!(tts.credentials.local_file, PathBuf::from("/tmp/creds.json"));
        assert_eq!(tts.auth.token_url, "https://oauth2.googleapis.com/token");
    }

    #[test]
    fn test_run_mode_deserialize() {
        let mode: RunMode = serde_json::from_str(r#""development""#).unwrap();
        assert!(mode.is_development());
        let mode: RunMode = serde_json::from_str(r#""production""#).unwrap();
        assert_eq!(mode.as_str(), "production");
    }
}
