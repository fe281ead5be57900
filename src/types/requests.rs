//! Upload input types.

use super::{ResourceType, UploadPolicy};
use crate::error::CloudinaryError;
use bytes::Bytes;
use mime::Mime;
use std::path::Path;

/// A file to upload.
///
/// Holds the content by value. Upload calls take the file and drop it when
/// they return.
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// File content.
    pub data: Bytes,
    /// File name sent as the multipart filename.
    pub file_name: String,
    /// Explicit MIME type. Guessed from `file_name` when `None`.
    pub mime_type: Option<Mime>,
}

impl UploadFile {
    /// Create a file from a name and content.
    pub fn new(file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            file_name: file_name.into(),
            mime_type: None,
        }
    }

    /// Set an explicit MIME type.
    pub fn with_mime_type(mut self, mime_type: Mime) -> Self {
        self.mime_type = Some(mime_type);
        self
    }

    /// Read a file from disk.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, CloudinaryError> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string());
        Ok(Self::new(file_name, data))
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// The effective MIME type: explicit, else guessed from the file name,
    /// else `application/octet-stream`.
    pub fn effective_mime_type(&self) -> Mime {
        self.mime_type.clone().unwrap_or_else(|| {
            mime_guess::from_path(&self.file_name).first_or_octet_stream()
        })
    }
}

/// Per-call upload options.
#[derive(Debug, Clone, Default)]
pub struct UploadOptions {
    /// Destination folder. Falls back to the configured default folder.
    pub folder: Option<String>,
    /// Explicit public ID.
    pub public_id: Option<String>,
    /// Tags to attach.
    pub tags: Vec<String>,
    /// Resource type (endpoint path segment).
    pub resource_type: ResourceType,
    /// Policy override for this call.
    pub policy: Option<UploadPolicy>,
}

impl UploadOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options targeting a folder.
    pub fn folder(folder: impl Into<String>) -> Self {
        Self {
            folder: Some(folder.into()),
            ..Default::default()
        }
    }

    /// Set the folder.
    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = Some(folder.into());
        self
    }

    /// Set the public ID.
    pub fn with_public_id(mut self, public_id: impl Into<String>) -> Self {
        self.public_id = Some(public_id.into());
        self
    }

    /// Add a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Set the resource type.
    pub fn with_resource_type(mut self, resource_type: ResourceType) -> Self {
        self.resource_type = resource_type;
        self
    }

    /// Override the upload policy for this call.
    pub fn with_policy(mut self, policy: UploadPolicy) -> Self {
        self.policy = Some(policy);
        self
    }
}
