//! Google OAuth2 Token Provider
//!
//! 按凭据类型获取 Bearer token：
//! - service_account: JWT bearer grant（RS256 签名）
//! - authorized_user: refresh token grant
//! - ADC: GOOGLE_APPLICATION_CREDENTIALS 文件 → gcloud 默认文件 → GCE metadata server
//!
//! token 在过期前 60 秒内保持复用

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::sync::Mutex;

use super::source::{AuthorizedUserKey, CredentialSource, CredentialsFile, ServiceAccountKey};
use crate::application::ports::ProviderError;

/// Cloud Platform 访问范围
pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const REFRESH_MARGIN_SECS: i64 = 60;
/// token 有效期上限（Google access token 最长 12 小时）
const MAX_TOKEN_LIFETIME_SECS: i64 = 12 * 60 * 60;

/// OAuth2 端点配置
#[derive(Debug, Clone)]
pub struct AuthEndpoints {
    /// 默认 token 端点（服务账号未指定 token_uri 时、refresh token 使用）
    pub token_url: String,
    /// GCE metadata server token 端点
    pub metadata_url: String,
}

impl Default for AuthEndpoints {
    fn default() -> Self {
        Self {
            token_url: "https://oauth2.googleapis.com/token".to_string(),
            metadata_url:
                "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token"
                    .to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    3600
}

/// 端点返回的 expires_in 限制在 [0, 12h]
fn token_lifetime(expires_in: i64) -> Duration {
    Duration::seconds(expires_in.clamp(0, MAX_TOKEN_LIFETIME_SECS))
}

#[derive(Debug, Serialize)]
struct JwtClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(REFRESH_MARGIN_SECS) < self.expires_at
    }
}

/// Google Token Provider
pub struct GoogleTokenProvider {
    http: Client,
    source: CredentialSource,
    endpoints: AuthEndpoints,
    cached: Mutex<Option<CachedToken>>,
}

impl GoogleTokenProvider {
    pub fn new(http: Client, source: CredentialSource, endpoints: AuthEndpoints) -> Self {
        Self {
            http,
            source,
            endpoints,
            cached: Mutex::new(None),
        }
    }

    /// 获取有效的 access token
    pub async fn access_token(&self) -> Result<String, ProviderError> {
        let mut cached = self.cached.lock().await;
        let now = Utc::now();

        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(now)) {
            return Ok(token.value.clone());
        }

        let response = match &self.source {
            CredentialSource::Environment(credentials) => self.fetch_for(credentials).await?,
            CredentialSource::LocalFile { credentials, .. } => self.fetch_for(credentials).await?,
            CredentialSource::ApplicationDefault => self.fetch_application_default().await?,
        };

        tracing::debug!(expires_in = response.expires_in, "Access token refreshed");

        let token = CachedToken {
            value: response.access_token,
            expires_at: now + token_lifetime(response.expires_in),
        };
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }

    async fn fetch_for(&self, credentials: &CredentialsFile) -> Result<TokenResponse, ProviderError> {
        match credentials {
            CredentialsFile::ServiceAccount(key) => self.fetch_service_account(key).await,
            CredentialsFile::AuthorizedUser(key) => self.fetch_authorized_user(key).await,
        }
    }

    async fn fetch_service_account(
        &self,
        key: &ServiceAccountKey,
    ) -> Result<TokenResponse, ProviderError> {
        let token_uri = key
            .token_uri
            .as_deref()
            .unwrap_or(&self.endpoints.token_url);
        let assertion = sign_assertion(key, token_uri, Utc::now())?;

        let request = self
            .http
            .post(token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())]);
        send_token_request(request).await
    }

    async fn fetch_authorized_user(
        &self,
        key: &AuthorizedUserKey,
    ) -> Result<TokenResponse, ProviderError> {
        let request = self.http.post(&self.endpoints.token_url).form(&[
            ("grant_type", "refresh_token"),
            ("client_id", key.client_id.as_str()),
            ("client_secret", key.client_secret.as_str()),
            ("refresh_token", key.refresh_token.as_str()),
        ]);
        send_token_request(request).await
    }

    async fn fetch_application_default(&self) -> Result<TokenResponse, ProviderError> {
        if let Some(path) = adc_file_path() {
            let credentials =
                CredentialsFile::from_path(&path).map_err(ProviderError::Authentication)?;
            tracing::debug!(path = %path.display(), "Using ADC credentials file");
            return self.fetch_for(&credentials).await;
        }

        tracing::debug!(url = %self.endpoints.metadata_url, "Using metadata server credentials");
        let request = self
            .http
            .get(&self.endpoints.metadata_url)
            .header("Metadata-Flavor", "Google");
        send_token_request(request).await
    }
}

/// 签发 JWT bearer assertion
fn sign_assertion(
    key: &ServiceAccountKey,
    audience: &str,
    now: DateTime<Utc>,
) -> Result<String, ProviderError> {
    let claims = JwtClaims {
        iss: &key.client_email,
        scope: CLOUD_PLATFORM_SCOPE,
        aud: audience,
        iat: now.timestamp(),
        exp: (now + Duration::hours(1)).timestamp(),
    };

    let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
        .map_err(|e| ProviderError::Authentication(format!("invalid service account key: {}", e)))?;

    encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
        .map_err(|e| ProviderError::Authentication(format!("failed to sign assertion: {}", e)))
}

async fn send_token_request(
    request: reqwest::RequestBuilder,
) -> Result<TokenResponse, ProviderError> {
    let response = request
        .send()
        .await
        .map_err(|e| ProviderError::Authentication(format!("token request failed: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::Authentication(format!(
            "token endpoint returned HTTP {}: {}",
            status, body
        )));
    }

    response
        .json::<TokenResponse>()
        .await
        .map_err(|e| ProviderError::Authentication(format!("invalid token response: {}", e)))
}

/// ADC 文件：GOOGLE_APPLICATION_CREDENTIALS 优先，其次 gcloud 默认位置
fn adc_file_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("GOOGLE_APPLICATION_CREDENTIALS") {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    dirs::home_dir()
        .map(|home| {
            home.join(".config")
                .join("gcloud")
                .join("application_default_credentials.json")
        })
        .filter(|path| path.exists())
}
