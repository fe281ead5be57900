//! Common enums and policy types.

use mime::Mime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default upload size ceiling (10 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Cloudinary resource type, the path segment before `/upload`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    /// Images.
    #[default]
    Image,
    /// Videos and audio.
    Video,
    /// Any other file.
    Raw,
    /// Let the service detect the type.
    Auto,
}

impl ResourceType {
    /// Returns the API string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Image => "image",
            ResourceType::Video => "video",
            ResourceType::Raw => "raw",
            ResourceType::Auto => "auto",
        }
    }
}

impl std::str::FromStr for ResourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(ResourceType::Image),
            "video" => Ok(ResourceType::Video),
            "raw" => Ok(ResourceType::Raw),
            "auto" => Ok(ResourceType::Auto),
            _ => Err(format!("Unknown resource type: {}", s)),
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which attempt produced an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadMode {
    /// Authenticated with an API-secret signature.
    Signed,
    /// Authorized by an upload preset.
    Unsigned,
}

impl UploadMode {
    /// Returns a lowercase name for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadMode::Signed => "signed",
            UploadMode::Unsigned => "unsigned",
        }
    }
}

impl fmt::Display for UploadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pre-flight checks applied to every file before upload.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadPolicy {
    /// Accepted MIME types (compared by type and subtype, parameters ignored).
    pub allowed_types: Vec<Mime>,
    /// Maximum file size in bytes.
    pub max_file_size: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            allowed_types: default_image_types(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl UploadPolicy {
    /// Create a policy from explicit values.
    pub fn new(allowed_types: Vec<Mime>, max_file_size: u64) -> Self {
        Self {
            allowed_types,
            max_file_size,
        }
    }

    /// Replace the allow-list.
    pub fn with_allowed_types(mut self, allowed_types: Vec<Mime>) -> Self {
        self.allowed_types = allowed_types;
        self
    }

    /// Replace the size ceiling.
    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    /// Check whether a MIME type is in the allow-list.
    pub fn allows(&self, mime_type: &Mime) -> bool {
        self.allowed_types
            .iter()
            .any(|allowed| allowed.essence_str() == mime_type.essence_str())
    }

    /// Allow-list as strings, for error messages.
    pub fn allowed_type_names(&self) -> Vec<String> {
        self.allowed_types
            .iter()
            .map(|m| m.essence_str().to_string())
            .collect()
    }
}

/// JPEG, PNG, GIF, and WebP.
pub fn default_image_types() -> Vec<Mime> {
    vec![
        mime::IMAGE_JPEG,
        mime::IMAGE_PNG,
        mime::IMAGE_GIF,
        image_webp(),
    ]
}

/// The `image/webp` MIME type (not a `mime` crate constant).
pub fn image_webp() -> Mime {
    "image/webp".parse().unwrap_or(mime::APPLICATION_OCTET_STREAM)
}
