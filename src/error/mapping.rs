//! Mapping from upload API error responses to typed errors.

use super::CloudinaryError;
use serde::Deserialize;

/// Error body returned by the upload API on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    /// The error detail.
    pub error: ApiErrorDetail,
}

/// The `error` object of an API error body.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    /// Human-readable error message.
    pub message: String,
}

/// Map a non-2xx response to a [`CloudinaryError::Api`].
///
/// Uses `error.message` when the body is the documented JSON shape, the raw
/// body text when it is not, and the status line when the body is empty.
pub fn map_api_error(status: u16, body: &[u8]) -> CloudinaryError {
    let message = match serde_json::from_slice::<ApiErrorBody>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) => {
            let text = String::from_utf8_lossy(body).trim().to_string();
            if text.is_empty() {
                format!("HTTP {}", status)
            } else {
                text
            }
        }
    };

    CloudinaryError::Api { status, message }
}
