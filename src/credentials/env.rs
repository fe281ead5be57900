//! Environment variable credentials provider.

use super::{CloudinaryCredentials, CloudinaryUrl, CredentialsProvider};
use crate::error::{CloudinaryError, CredentialsError};
use async_trait::async_trait;
use std::env;

/// Environment variable holding the API key.
pub const CLOUDINARY_API_KEY: &str = "CLOUDINARY_API_KEY";
/// Environment variable holding the API secret.
pub const CLOUDINARY_API_SECRET: &str = "CLOUDINARY_API_SECRET";
/// Environment variable holding a full `cloudinary://` URL.
pub const CLOUDINARY_URL: &str = "CLOUDINARY_URL";

/// Credentials provider that reads from environment variables.
///
/// Looks for `CLOUDINARY_API_KEY` and `CLOUDINARY_API_SECRET` first, then
/// for the key and secret embedded in `CLOUDINARY_URL`.
#[derive(Debug, Clone, Default)]
pub struct EnvCredentialsProvider {
    api_key_var: Option<String>,
    api_secret_var: Option<String>,
    url_var: Option<String>,
}

impl EnvCredentialsProvider {
    /// Create a new environment credentials provider with default variable names.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider with custom variable names.
    pub fn with_vars(
        api_key_var: impl Into<String>,
        api_secret_var: impl Into<String>,
        url_var: Option<String>,
    ) -> Self {
        Self {
            api_key_var: Some(api_key_var.into()),
            api_secret_var: Some(api_secret_var.into()),
            url_var,
        }
    }

    fn api_key_var(&self) -> &str {
        self.api_key_var.as_deref().unwrap_or(CLOUDINARY_API_KEY)
    }

    fn api_secret_var(&self) -> &str {
        self.api_secret_var.as_deref().unwrap_or(CLOUDINARY_API_SECRET)
    }

    fn url_var(&self) -> &str {
        self.url_var.as_deref().unwrap_or(CLOUDINARY_URL)
    }

    /// Read credentials synchronously.
    pub fn load(&self) -> Result<CloudinaryCredentials, CloudinaryError> {
        let api_key = env::var(self.api_key_var()).ok();
        let api_secret = env::var(self.api_secret_var()).ok();

        match (api_key, api_secret) {
            (Some(key), Some(secret)) => {
                if key.is_empty() {
                    return Err(CloudinaryError::Credentials(CredentialsError::Invalid {
                        message: format!("{} is empty", self.api_key_var()),
                    }));
                }
                if secret.is_empty() {
                    return Err(CloudinaryError::Credentials(CredentialsError::Invalid {
                        message: format!("{} is empty", self.api_secret_var()),
                    }));
                }
                Ok(CloudinaryCredentials::new(key, secret))
            }
            _ => match env::var(self.url_var()) {
                Ok(value) if !value.is_empty() => {
                    let parsed: CloudinaryUrl = value.parse()?;
                    Ok(parsed.credentials)
                }
                _ => Err(CloudinaryError::Credentials(CredentialsError::NotFound)),
            },
        }
    }
}

#[async_trait]
impl CredentialsProvider for EnvCredentialsProvider {
    async fn get_credentials(&self) -> Result<CloudinaryCredentials, CloudinaryError> {
        self.load()
    }

    fn name(&self) -> &'static str {
        "environment"
    }
}
