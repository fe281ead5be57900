//! Cloudinary Upload Integration Module
//!
//! Type-safe client for uploading images to Cloudinary.
//!
//! # Features
//!
//! - **Signed uploads**: SHA-1 request signatures computed locally from the
//!   API secret, with a bundled SHA-1 used when the platform backend fails
//! - **Unsigned fallback**: a failed signed upload is retried once through an
//!   upload preset
//! - **Pre-flight validation**: MIME allow-list and size ceiling checked
//!   before any request is sent
//! - **Batch uploads**: concurrent multi-file uploads with per-file results
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use cloudinary_upload::{CloudinaryClient, UploadFile, UploadOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), cloudinary_upload::CloudinaryError> {
//!     // Reads CLOUDINARY_URL or CLOUDINARY_CLOUD_NAME and friends
//!     let client = cloudinary_upload::create_client_from_env()?;
//!
//!     let file = UploadFile::from_path("campus.jpg").await?;
//!     let result = client
//!         .uploads()
//!         .upload_image(file, &UploadOptions::folder("college/hero"))
//!         .await?;
//!
//!     println!("Uploaded to {}", result.secure_url);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod mocks;
pub mod multipart;
pub mod resilience;
pub mod services;
pub mod signing;
pub mod transfer;
pub mod transport;
pub mod types;

// Re-export main types at crate root
pub use client::{CloudinaryClient, CloudinaryClientBuilder, CloudinaryClientImpl};
pub use config::CloudinaryConfig;
pub use credentials::{
    CloudinaryCredentials, CloudinaryUrl, CredentialsProvider, EnvCredentialsProvider,
    StaticCredentialsProvider,
};
pub use error::{
    ConfigurationError, CloudinaryError, CredentialsError, NetworkError, ResponseError,
    SigningError, ValidationError,
};
pub use services::{BatchOptions, BatchUploadError, BatchUploadReport, UploadService};
pub use signing::{ApiSecretSigner, RequestSigner, SignedParams};
pub use transfer::{ProgressCallback, TransferProgress};
pub use transport::{HttpRequest, HttpResponse, HttpTransport};
pub use types::{
    ResourceType, UploadFile, UploadMode, UploadOptions, UploadPolicy, UploadResult,
};

/// Create a new Cloudinary client from environment variables.
///
/// This will attempt to read configuration from:
/// - `CLOUDINARY_URL` (`cloudinary://<api_key>:<api_secret>@<cloud_name>`)
/// - `CLOUDINARY_CLOUD_NAME`, `CLOUDINARY_API_KEY` and `CLOUDINARY_API_SECRET`
/// - `CLOUDINARY_UPLOAD_PRESET` for the unsigned fallback
/// - `CLOUDINARY_UPLOAD_FOLDER` for the default folder
///
/// # Example
///
/// ```rust,no_run
/// let client = cloudinary_upload::create_client_from_env()?;
/// # Ok::<(), cloudinary_upload::CloudinaryError>(())
/// ```
pub fn create_client_from_env() -> Result<impl CloudinaryClient> {
    CloudinaryClientBuilder::new().from_env().build()
}

/// Create a new Cloudinary client with explicit configuration.
///
/// # Example
///
/// ```rust,no_run
/// use cloudinary_upload::{CloudinaryConfig, CloudinaryCredentials, StaticCredentialsProvider};
/// use std::sync::Arc;
///
/// let config = CloudinaryConfig::builder()
///     .cloud_name("demo")
///     .upload_preset("college_unsigned")
///     .credentials_provider(Arc::new(StaticCredentialsProvider::new(
///         CloudinaryCredentials::new("123456789012345", "api-secret"),
///     )))
///     .build()?;
///
/// let client = cloudinary_upload::create_client(config)?;
/// # Ok::<(), cloudinary_upload::CloudinaryError>(())
/// ```
pub fn create_client(config: CloudinaryConfig) -> Result<impl CloudinaryClient> {
    CloudinaryClientBuilder::new().config(config).build()
}

/// Result type alias for Cloudinary operations.
pub type Result<T> = std::result::Result<T, CloudinaryError>;
