//! Cloudinary API credentials.
//!
//! The API secret is only needed for signed uploads. It is always injected
//! at runtime (explicitly, or from the environment) and is never written to
//! `Debug` output.

mod env;
mod cloudinary_url;

pub use self::env::EnvCredentialsProvider;
pub use self::cloudinary_url::CloudinaryUrl;

use crate::error::CloudinaryError;
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::fmt;

/// Cloudinary API key and secret.
#[derive(Clone)]
pub struct CloudinaryCredentials {
    api_key: String,
    api_secret: SecretString,
}

impl CloudinaryCredentials {
    /// Create new credentials.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: SecretString::new(api_secret.into()),
        }
    }

    /// Get the API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Get the API secret.
    ///
    /// Note: This exposes the secret. Use carefully and avoid logging.
    pub fn api_secret(&self) -> &str {
        self.api_secret.expose_secret()
    }
}

impl fmt::Debug for CloudinaryCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudinaryCredentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

/// Trait for credential providers.
#[async_trait]
pub trait CredentialsProvider: Send + Sync {
    /// Get credentials from this provider.
    async fn get_credentials(&self) -> Result<CloudinaryCredentials, CloudinaryError>;

    /// Provider name for logging/debugging.
    fn name(&self) -> &'static str;
}

/// Static credentials provider for testing or explicit configuration.
pub struct StaticCredentialsProvider {
    credentials: CloudinaryCredentials,
}

impl StaticCredentialsProvider {
    /// Create a new static credentials provider.
    pub fn new(credentials: CloudinaryCredentials) -> Self {
        Self { credentials }
    }
}

#[async_trait]
impl CredentialsProvider for StaticCredentialsProvider {
    async fn get_credentials(&self) -> Result<CloudinaryCredentials, CloudinaryError> {
        Ok(self.credentials.clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

impl fmt::Debug for StaticCredentialsProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentialsProvider")
            .field("credentials", &self.credentials)
            .finish()
    }
}
