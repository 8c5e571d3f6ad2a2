//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// # 环境变量示例
/// - `HABLA_SERVER__PORT=8080`
/// - `HABLA_ENVIRONMENT=development`
/// - `HABLA_PROVIDER__TIMEOUT_SECS=30`
/// - `HABLA_LOG__JSON=true`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// `config_path` 为 None 时搜索当前目录下的 config.toml / config.local.toml
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000)?
        .set_default("provider.base_url", "https://texttospeech.googleapis.com")?
        .set_default("provider.timeout_secs", 0)?
        .set_default("environment", "production")?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 例如: HABLA_SERVER__PORT=8080
    builder = builder.add_source(
        Environment::with_prefix("HABLA")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.provider.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Provider base URL cannot be empty".to_string(),
        ));
    }

    if config.credentials.env_var.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Credentials env var name cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("Environment: {}", config.environment.as_str());
    tracing::info!("Provider URL: {}", config.provider.base_url);
    if config.provider.timeout_secs > 0 {
        tracing::info!("Provider Timeout: {}s", config.provider.timeout_secs);
    } else {
        tracing::info!("Provider Timeout: none");
    }
    tracing::info!("Credentials Env Var: {}", config.credentials.env_var);
    if config.environment.is_development() {
        tracing::info!("Local Credentials File: {:?}", config.credentials.local_file);
    }
    tracing::info!("Log Level: {} (json: {})", config.log.level, config.log.json);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunMode;
    use std::io::Write;

    fn write_toml(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_provider_url() {
        let mut config = AppConfig::default();
        config.provider.base_url = "  ".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_env_var() {
        let mut config = AppConfig::default();
        config.credentials.env_var = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let file = write_toml(
            r#"
environment = "development"

[server]
port = 8081

[provider]
base_url = "http://127.0.0.1:9000"
timeout_secs = 15

[credentials]
local_file = "secrets/credentials.json"
"#,
        );

        let config = load_config_from_path(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.environment, RunMode::Development);
        assert_eq!(config.provider.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.provider.timeout_secs, 15);
        assert_eq!(
            config.credentials.local_file,
            std::path::PathBuf::from("secrets/credentials.json")
        );
        assert_eq!(config.credentials.env_var, "GOOGLE_APPLICATION_CREDENTIALS_JSON");
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let file = write_toml("[server]\nport = 0\n");
        let err = load_config_from_path(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
