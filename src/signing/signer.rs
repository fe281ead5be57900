//! Request signer backed by the account API secret.

use super::{sign_params, FallbackSha1, Sha1Backend, TIMESTAMP_PARAM};
use crate::credentials::CredentialsProvider;
use crate::error::{CloudinaryError, SigningError};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Fields added to a signed upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedParams {
    /// API key of the signing account.
    pub api_key: String,
    /// Unix seconds. Sent with the request and included in the signature.
    pub timestamp: i64,
    /// Lowercase hex SHA-1 signature.
    pub signature: String,
}

/// Trait for upload signers.
#[async_trait]
pub trait RequestSigner: Send + Sync {
    /// Sign a parameter set at the current time.
    ///
    /// `params` must not contain `timestamp`; the signer adds it.
    async fn sign(&self, params: &BTreeMap<String, String>) -> Result<SignedParams, CloudinaryError>;
}

/// Signs uploads locally with the API secret.
pub struct ApiSecretSigner {
    credentials_provider: Arc<dyn CredentialsProvider>,
    backend: Box<dyn Sha1Backend>,
}

impl ApiSecretSigner {
    /// Create a signer using the default backend (`ring` with bundled fallback).
    pub fn new(credentials_provider: Arc<dyn CredentialsProvider>) -> Self {
        Self::with_backend(credentials_provider, Box::new(FallbackSha1::default()))
    }

    /// Create a signer with a specific SHA-1 backend.
    pub fn with_backend(
        credentials_provider: Arc<dyn CredentialsProvider>,
        backend: Box<dyn Sha1Backend>,
    ) -> Self {
        Self {
            credentials_provider,
            backend,
        }
    }

    /// Sign a parameter set at an explicit timestamp.
    pub async fn sign_at(
        &self,
        params: &BTreeMap<String, String>,
        timestamp: i64,
    ) -> Result<SignedParams, CloudinaryError> {
        if timestamp < 0 {
            return Err(CloudinaryError::Signing(SigningError::InvalidTimestamp {
                message: format!("{} is before the Unix epoch", timestamp),
            }));
        }

        let credentials = self.credentials_provider.get_credentials().await?;

        let mut to_sign = params.clone();
        to_sign.insert(TIMESTAMP_PARAM.to_string(), timestamp.to_string());

        let signature = sign_params(&to_sign, credentials.api_secret(), self.backend.as_ref())?;

        trace!(
            provider = self.credentials_provider.name(),
            backend = self.backend.name(),
            timestamp,
            "Signed upload parameters"
        );

        Ok(SignedParams {
            api_key: credentials.api_key().to_string(),
            timestamp,
            signature,
        })
    }
}

#[async_trait]
impl RequestSigner for ApiSecretSigner {
    async fn sign(&self, params: &BTreeMap<String, String>) -> Result<SignedParams, CloudinaryError> {
        self.sign_at(params, Utc::now().timestamp()).await
    }
}

impl fmt::Debug for ApiSecretSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiSecretSigner")
            .field("provider", &self.credentials_provider.name())
            .field("backend", &self.backend.name())
            .finish()
    }
}
