//! Cloudinary client implementation.
//!
//! This module provides the main client interface and builder.

use crate::config::CloudinaryConfig;
use crate::error::CloudinaryError;
use crate::services::UploadService;
use crate::signing::{ApiSecretSigner, RequestSigner};
use crate::transport::{HttpTransport, ReqwestTransport};
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// Cloudinary client trait.
pub trait CloudinaryClient: Send + Sync {
    /// Get the upload service.
    fn uploads(&self) -> &UploadService;

    /// Get the client configuration.
    fn config(&self) -> &CloudinaryConfig;
}

/// Cloudinary client implementation.
pub struct CloudinaryClientImpl {
    config: Arc<CloudinaryConfig>,
    transport: Arc<dyn HttpTransport>,
    signer: Arc<dyn RequestSigner>,

    uploads: OnceCell<UploadService>,
}

impl CloudinaryClientImpl {
    /// Create a client that signs with the configured credentials provider.
    pub fn new(config: CloudinaryConfig, transport: Arc<dyn HttpTransport>) -> Self {
        let signer = Arc::new(ApiSecretSigner::new(config.credentials_provider.clone()));
        Self::with_signer(config, transport, signer)
    }

    /// Create a client with an explicit signer.
    pub fn with_signer(
        config: CloudinaryConfig,
        transport: Arc<dyn HttpTransport>,
        signer: Arc<dyn RequestSigner>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            transport,
            signer,
            uploads: OnceCell::new(),
        }
    }
}

impl CloudinaryClient for CloudinaryClientImpl {
    fn uploads(&self) -> &UploadService {
        self.uploads.get_or_init(|| {
            UploadService::new(
                self.config.clone(),
                self.transport.clone(),
                self.signer.clone(),
            )
        })
    }

    fn config(&self) -> &CloudinaryConfig {
        &self.config
    }
}

impl std::fmt::Debug for CloudinaryClientImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudinaryClientImpl")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Builder for the Cloudinary client.
pub struct CloudinaryClientBuilder {
    config: Option<CloudinaryConfig>,
    from_env: bool,
    transport: Option<Arc<dyn HttpTransport>>,
    signer: Option<Arc<dyn RequestSigner>>,
}

impl CloudinaryClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            config: None,
            from_env: false,
            transport: None,
            signer: None,
        }
    }

    /// Use the provided configuration.
    pub fn config(mut self, config: CloudinaryConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Load configuration from environment variables.
    pub fn from_env(mut self) -> Self {
        self.from_env = true;
        self
    }

    /// Use a custom HTTP transport.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Use a custom signer instead of signing locally with the API secret.
    pub fn signer(mut self, signer: Arc<dyn RequestSigner>) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Build the client.
    ///
    /// Fails with a missing cloud name when neither a configuration nor
    /// `from_env` was given.
    pub fn build(self) -> Result<CloudinaryClientImpl, CloudinaryError> {
        let config = match self.config {
            Some(config) => config,
            None if self.from_env => CloudinaryConfig::builder().from_env().build()?,
            None => CloudinaryConfig::builder().build()?,
        };

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(
                ReqwestTransport::builder()
                    .connect_timeout(config.connect_timeout)
                    .request_timeout(config.request_timeout)
                    .user_agent(config.user_agent.clone())
                    .build()?,
            ),
        };

        Ok(match self.signer {
            Some(signer) => CloudinaryClientImpl::with_signer(config, transport, signer),
            None => CloudinaryClientImpl::new(config, transport),
        })
    }
}

impl Default for CloudinaryClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
