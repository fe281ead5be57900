//! Mock implementations for testing.
//!
//! This module provides mock implementations of the transport, signer and
//! credentials seams, plus canned upload API payloads.

mod credentials;
mod signer;
mod transport;

pub use credentials::MockCredentialsProvider;
pub use signer::{MockSigner, SignerFailure};
pub use transport::{form_field, form_file_name, MockResponse, MockTransport};

use crate::config::CloudinaryConfig;
use crate::credentials::{CloudinaryCredentials, CredentialsProvider, StaticCredentialsProvider};
use crate::error::CloudinaryError;
use crate::types::UploadFile;
use std::sync::Arc;

/// Test fixtures for upload operations.
pub struct TestFixtures;

impl TestFixtures {
    /// Cloud name used by fixtures.
    pub const CLOUD_NAME: &'static str = "demo";
    /// Upload preset used by fixtures.
    pub const UPLOAD_PRESET: &'static str = "college_unsigned";

    /// Sample credentials.
    pub fn credentials() -> CloudinaryCredentials {
        CloudinaryCredentials::new(
            MockCredentialsProvider::API_KEY,
            MockCredentialsProvider::API_SECRET,
        )
    }

    /// Static provider for the sample credentials.
    pub fn credentials_provider() -> Arc<dyn CredentialsProvider> {
        Arc::new(StaticCredentialsProvider::new(Self::credentials()))
    }

    /// Configuration with the sample cloud, preset and credentials.
    pub fn config() -> Result<CloudinaryConfig, CloudinaryError> {
        CloudinaryConfig::builder()
            .cloud_name(Self::CLOUD_NAME)
            .upload_preset(Self::UPLOAD_PRESET)
            .credentials_provider(Self::credentials_provider())
            .build()
    }

    /// Smallest valid PNG header and IHDR chunk.
    pub fn png_bytes() -> Vec<u8> {
        vec![
            0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48,
            0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00,
            0x00, 0x1F, 0x15, 0xC4, 0x89,
        ]
    }

    /// JPEG start-of-image and JFIF marker.
    pub fn jpeg_bytes() -> Vec<u8> {
        vec![
            0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46, 0x00, 0x01, 0x01, 0x00,
            0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0xFF, 0xD9,
        ]
    }

    /// A PNG upload file.
    pub fn png_file(file_name: &str) -> UploadFile {
        UploadFile::new(file_name, Self::png_bytes())
    }

    /// A JPEG upload file.
    pub fn jpeg_file(file_name: &str) -> UploadFile {
        UploadFile::new(file_name, Self::jpeg_bytes())
    }

    /// Success body of the upload API.
    pub fn upload_json(public_id: &str) -> String {
        format!(
            r#"{{
    "asset_id": "3515c6000a548515f1134043f9785c2f",
    "public_id": "{id}",
    "version": 1700000000,
    "width": 1200,
    "height": 800,
    "format": "png",
    "resource_type": "image",
    "created_at": "2026-01-15T10:30:00Z",
    "bytes": 33,
    "url": "http://res.cloudinary.com/demo/image/upload/v1700000000/{id}.png",
    "secure_url": "https://res.cloudinary.com/demo/image/upload/v1700000000/{id}.png",
    "original_filename": "upload"
}}"#,
            id = public_id
        )
    }

    /// Secure URL that [`TestFixtures::upload_json`] reports for `public_id`.
    pub fn secure_url(public_id: &str) -> String {
        format!(
            "https://res.cloudinary.com/demo/image/upload/v1700000000/{}.png",
            public_id
        )
    }

    /// Successful upload response.
    pub fn upload_response(public_id: &str) -> MockResponse {
        MockResponse::ok_with_body(Self::upload_json(public_id))
    }

    /// Error body of the upload API.
    pub fn error_json(message: &str) -> String {
        serde_json::json!({ "error": { "message": message } }).to_string()
    }

    /// Error response of the upload API.
    pub fn error_response(status: u16, message: &str) -> MockResponse {
        MockResponse::error(status, Self::error_json(message))
    }

    /// The error [`TestFixtures::error_response`] maps to.
    pub fn api_error(status: u16, message: &str) -> CloudinaryError {
        CloudinaryError::Api {
            status,
            message: message.to_string(),
        }
    }
}
