//! Mock credentials provider for testing.

use crate::credentials::{CloudinaryCredentials, CredentialsProvider};
use crate::error::{CloudinaryError, CredentialsError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock credentials provider for testing.
pub struct MockCredentialsProvider {
    credentials: Mutex<Option<CloudinaryCredentials>>,
    call_count: AtomicUsize,
}

impl MockCredentialsProvider {
    /// API key of the default mock credentials.
    pub const API_KEY: &'static str = "123456789012345";
    /// API secret of the default mock credentials.
    pub const API_SECRET: &'static str = "abcd_efgh-ijklmnop";

    /// Create a mock credentials provider with fixed credentials.
    pub fn new() -> Self {
        Self::with_credentials(CloudinaryCredentials::new(Self::API_KEY, Self::API_SECRET))
    }

    /// Create a mock credentials provider with custom credentials.
    pub fn with_credentials(credentials: CloudinaryCredentials) -> Self {
        Self {
            credentials: Mutex::new(Some(credentials)),
            call_count: AtomicUsize::new(0),
        }
    }

    /// Create a mock credentials provider with no credentials.
    pub fn empty() -> Self {
        Self {
            credentials: Mutex::new(None),
            call_count: AtomicUsize::new(0),
        }
    }

    /// Set the credentials to return.
    pub fn set_credentials(&self, credentials: Option<CloudinaryCredentials>) {
        *self.credentials.lock() = credentials;
    }

    /// Get the number of times credentials were requested.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl Default for MockCredentialsProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialsProvider for MockCredentialsProvider {
    async fn get_credentials(&self) -> Result<CloudinaryCredentials, CloudinaryError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.credentials
            .lock()
            .clone()
            .ok_or_else(|| CredentialsError::NotFound.into())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

impl std::fmt::Debug for MockCredentialsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockCredentialsProvider")
            .field("has_credentials", &self.credentials.lock().is_some())
            .field("call_count", &self.call_count())
            .finish()
    }
}
