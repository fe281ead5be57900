//! Error types for the Cloudinary upload integration.
//!
//! Errors are grouped by where they originate: local configuration,
//! credentials, signing, pre-flight validation, transport, or the remote API.
//! Only [`CloudinaryError::UploadFailed`] carries both halves of the
//! signed/unsigned fallback.

mod mapping;

pub use mapping::{map_api_error, ApiErrorBody, ApiErrorDetail};

use std::time::Duration;
use thiserror::Error;

/// Top-level error type for the Cloudinary integration.
#[derive(Debug, Error)]
pub enum CloudinaryError {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Credential-related errors.
    #[error("Credentials error: {0}")]
    Credentials(#[from] CredentialsError),

    /// Signature generation errors.
    #[error("Signing error: {0}")]
    Signing(#[from] SigningError),

    /// Pre-flight validation errors. No request is issued when these occur.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Network and transport errors.
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    /// Non-2xx response from the upload API.
    #[error("Cloudinary API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message from the `error.message` field, or the raw body.
        message: String,
    },

    /// Response parsing errors.
    #[error("Response error: {0}")]
    Response(#[from] ResponseError),

    /// Both the signed and the unsigned attempt failed.
    #[error("Upload failed. Signed upload: {signed}. Unsigned upload: {unsigned}")]
    UploadFailed {
        /// Why the signed attempt failed.
        signed: Box<CloudinaryError>,
        /// Why the unsigned attempt failed.
        unsigned: Box<CloudinaryError>,
    },

    /// Local I/O errors (reading a file from disk).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CloudinaryError {
    /// Returns true if the error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            CloudinaryError::Network(e) => e.is_retryable(),
            CloudinaryError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Returns the HTTP status code if applicable.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            CloudinaryError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the error was raised before any request was sent.
    pub fn is_validation(&self) -> bool {
        matches!(self, CloudinaryError::Validation(_))
    }
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// Missing cloud name.
    #[error("Missing cloud name: set it via config, CLOUDINARY_CLOUD_NAME or CLOUDINARY_URL")]
    MissingCloudName,

    /// Unsigned uploads require an upload preset.
    #[error("Missing upload preset: unsigned uploads require an upload preset")]
    MissingUploadPreset,

    /// Invalid API base URL.
    #[error("Invalid API base URL '{url}': {details}")]
    InvalidApiBase {
        /// The invalid URL.
        url: String,
        /// Details about the parse failure.
        details: String,
    },

    /// Invalid `CLOUDINARY_URL` value.
    #[error("Invalid CLOUDINARY_URL: {message}")]
    InvalidCloudinaryUrl {
        /// What is wrong with the value.
        message: String,
    },

    /// Invalid configuration value.
    #[error("Invalid configuration: {field} - {message}")]
    InvalidConfiguration {
        /// The configuration field name.
        field: String,
        /// Error message.
        message: String,
    },
}

/// Credential-related errors.
#[derive(Debug, Error)]
pub enum CredentialsError {
    /// No credentials could be found.
    #[error("Credentials not found: no API key and secret are configured")]
    NotFound,

    /// Credentials are present but unusable.
    #[error("Invalid credentials: {message}")]
    Invalid {
        /// Details about why credentials are invalid.
        message: String,
    },
}

/// Signature generation errors.
#[derive(Debug, Error)]
pub enum SigningError {
    /// A hashing backend could not produce a digest.
    #[error("SHA-1 backend '{backend}' failed: {message}")]
    BackendFailed {
        /// Backend name.
        backend: &'static str,
        /// Failure details.
        message: String,
    },

    /// The system clock is before the Unix epoch.
    #[error("Invalid timestamp: {message}")]
    InvalidTimestamp {
        /// Details about the timestamp error.
        message: String,
    },
}

/// Pre-flight validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The file's MIME type is not in the allow-list.
    #[error("Invalid file type '{mime_type}': allowed types are {}", .allowed.join(", "))]
    InvalidFileType {
        /// The rejected MIME type.
        mime_type: String,
        /// The allow-list in effect.
        allowed: Vec<String>,
    },

    /// The file exceeds the size ceiling.
    #[error("File too large: {size} bytes exceeds maximum of {max_size} bytes")]
    FileTooLarge {
        /// The file size.
        size: u64,
        /// The configured ceiling.
        max_size: u64,
    },
}

/// Network and transport errors.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Connection could not be established or was dropped.
    #[error("Connection failed: {message}")]
    ConnectionFailed {
        /// Details about the failure.
        message: String,
    },

    /// The request timed out.
    #[error("Request timed out after {duration:?}")]
    Timeout {
        /// The timeout that elapsed.
        duration: Duration,
    },

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {message}")]
    ClientBuild {
        /// Details about the failure.
        message: String,
    },
}

impl NetworkError {
    /// Returns true if the error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            NetworkError::ConnectionFailed { .. } | NetworkError::Timeout { .. }
        )
    }
}

/// Response parsing errors.
#[derive(Debug, Error)]
pub enum ResponseError {
    /// The success body could not be decoded.
    #[error("Invalid upload response: {message}")]
    InvalidResponse {
        /// Details about the decode failure.
        message: String,
    },
}
