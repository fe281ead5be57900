//! Upload response types.

use super::{ResourceType, UploadMode};
use crate::error::{CloudinaryError, ResponseError};
use serde::{Deserialize, Serialize};

/// Raw success body of the upload API.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadApiResponse {
    /// HTTPS delivery URL.
    pub secure_url: String,
    /// Public ID of the stored asset.
    pub public_id: String,
    /// Width in pixels. Absent for raw files.
    #[serde(default)]
    pub width: Option<u32>,
    /// Height in pixels. Absent for raw files.
    #[serde(default)]
    pub height: Option<u32>,
    /// File format (e.g. `jpg`).
    #[serde(default)]
    pub format: Option<String>,
    /// Stored size in bytes.
    #[serde(default)]
    pub bytes: Option<u64>,
    /// Resource type.
    #[serde(default)]
    pub resource_type: Option<String>,
    /// Asset version.
    #[serde(default)]
    pub version: Option<u64>,
    /// Creation timestamp (RFC 3339).
    #[serde(default)]
    pub created_at: Option<String>,
    /// HTTP delivery URL.
    #[serde(default)]
    pub url: Option<String>,
    /// Original file name without extension.
    #[serde(default)]
    pub original_filename: Option<String>,
}

impl UploadApiResponse {
    /// Decode a success body for an upload of `resource_type`.
    ///
    /// Image uploads must report their dimensions.
    pub fn parse(body: &[u8], resource_type: ResourceType) -> Result<Self, CloudinaryError> {
        let parsed: Self = serde_json::from_slice(body).map_err(|e| {
            CloudinaryError::Response(ResponseError::InvalidResponse {
                message: e.to_string(),
            })
        })?;

        if resource_type == ResourceType::Image
            && (parsed.width.is_none() || parsed.height.is_none())
        {
            return Err(CloudinaryError::Response(ResponseError::InvalidResponse {
                message: "image upload response is missing width or height".to_string(),
            }));
        }

        Ok(parsed)
    }

    /// Convert into an [`UploadResult`] tagged with the attempt mode.
    pub fn into_result(self, mode: UploadMode) -> UploadResult {
        UploadResult {
            secure_url: self.secure_url,
            public_id: self.public_id,
            width: self.width.unwrap_or(0),
            height: self.height.unwrap_or(0),
            format: self.format,
            bytes: self.bytes,
            resource_type: self.resource_type,
            version: self.version,
            created_at: self.created_at,
            url: self.url,
            original_filename: self.original_filename,
            mode,
        }
    }
}

/// A completed upload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
    /// HTTPS delivery URL.
    pub secure_url: String,
    /// Public ID of the stored asset.
    pub public_id: String,
    /// Width in pixels. Zero for non-image uploads without dimensions.
    pub width: u32,
    /// Height in pixels. Zero for non-image uploads without dimensions.
    pub height: u32,
    /// File format.
    pub format: Option<String>,
    /// Stored size in bytes.
    pub bytes: Option<u64>,
    /// Resource type.
    pub resource_type: Option<String>,
    /// Asset version.
    pub version: Option<u64>,
    /// Creation timestamp.
    pub created_at: Option<String>,
    /// HTTP delivery URL.
    pub url: Option<String>,
    /// Original file name.
    pub original_filename: Option<String>,
    /// Which attempt succeeded.
    pub mode: UploadMode,
}
