//! Credentials Adapter - Google Cloud 凭据解析与 token 获取

mod source;
mod token_provider;

pub use source::{
    resolve, resolve_with, AuthorizedUserKey, CredentialSettings, CredentialSource,
    CredentialsFile, ServiceAccountKey,
};
pub use token_provider::{AuthEndpoints, GoogleTokenProvider, CLOUD_PLATFORM_SCOPE};
