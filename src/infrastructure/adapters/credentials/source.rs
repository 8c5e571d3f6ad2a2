//! Credential Source - 凭据来源解析
//!
//! 解析顺序（在客户端构造时执行一次）：
//! 1. 环境变量中的 JSON 凭据（可解析时）
//! 2. 开发模式下工作目录中的本地凭据文件（存在时）
//! 3. Application Default Credentials（运行环境自动发现）
//!
//! 第 1、2 步的解析失败只记录日志并继续，不会返回给调用方

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 凭据解析设置
#[derive(Debug, Clone)]
pub struct CredentialSettings {
    /// 存放 JSON 凭据的环境变量名
    pub env_var: String,
    /// 是否为开发模式（允许读取本地凭据文件）
    pub development: bool,
    /// 本地凭据文件路径
    pub local_file: PathBuf,
}

impl Default for CredentialSettings {
    fn default() -> Self {
        Self {
            env_var: "GOOGLE_APPLICATION_CREDENTIALS_JSON".to_string(),
            development: false,
            local_file: PathBuf::from("credentials.json"),
        }
    }
}

/// 服务账号密钥
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub token_uri: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .field("token_uri", &self.token_uri)
            .field("project_id", &self.project_id)
            .finish()
    }
}

/// gcloud 用户凭据（refresh token）
#[derive(Clone, Deserialize)]
pub struct AuthorizedUserKey {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

impl std::fmt::Debug for AuthorizedUserKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizedUserKey")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

/// 结构化凭据文档（按 `type` 字段区分）
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CredentialsFile {
    ServiceAccount(ServiceAccountKey),
    AuthorizedUser(AuthorizedUserKey),
}

impl CredentialsFile {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn from_path(path: &Path) -> Result<Self, String> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
        Self::from_json(&raw).map_err(|e| format!("failed to parse {}: {}", path.display(), e))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::ServiceAccount(_) => "service_account",
            Self::AuthorizedUser(_) => "authorized_user",
        }
    }
}

/// 凭据来源
#[derive(Debug, Clone)]
pub enum CredentialSource {
    /// 环境变量中的 JSON
    Environment(CredentialsFile),
    /// 开发模式下的本地文件
    LocalFile {
        path: PathBuf,
        credentials: CredentialsFile,
    },
    /// 交给运行环境自动发现
    ApplicationDefault,
}

impl CredentialSource {
    pub fn describe(&self) -> String {
        match self {
            Self::Environment(c) => format!("environment ({})", c.kind()),
            Self::LocalFile { path, credentials } => {
                format!("local file {} ({})", path.display(), credentials.kind())
            }
            Self::ApplicationDefault => "application default credentials".to_string(),
        }
    }
}

/// 从进程环境解析凭据来源
pub fn resolve(settings: &CredentialSettings) -> CredentialSource {
    let env_value = std::env::var(&settings.env_var).ok();
    resolve_with(env_value.as_deref(), settings)
}

/// 按固定顺序解析凭据来源
///
/// `env_value` 为环境变量的原始值
pub fn resolve_with(env_value: Option<&str>, settings: &CredentialSettings) -> CredentialSource {
    if let Some(raw) = env_value.filter(|v| !v.trim().is_empty()) {
        match CredentialsFile::from_json(raw) {
            Ok(credentials) => {
                tracing::info!(
                    var = %settings.env_var,
                    kind = credentials.kind(),
                    "Using credentials from environment variable"
                );
                return CredentialSource::Environment(credentials);
            }
            Err(e) => {
                tracing::error!(
                    var = %settings.env_var,
                    error = %e,
                    "Failed to parse credentials from environment, falling back"
                );
            }
        }
    }

    if settings.development && settings.local_file.exists() {
        match CredentialsFile::from_path(&settings.local_file) {
            Ok(credentials) => {
                tracing::info!(
                    path = %settings.local_file.display(),
                    kind = credentials.kind(),
                    "Using credentials from local file"
                );
                return CredentialSource::LocalFile {
                    path: settings.local_file.clone(),
                    credentials,
                };
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load local credentials file, falling back");
            }
        }
    }

    tracing::info!("Using Application Default Credentials");
    CredentialSource::ApplicationDefault
}
