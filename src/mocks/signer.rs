//! Mock signer for testing.

use crate::error::{CloudinaryError, CredentialsError, SigningError};
use crate::signing::{RequestSigner, SignedParams};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// How the mock signer fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignerFailure {
    /// No credentials are available.
    MissingCredentials,
    /// The hashing backend failed.
    BackendFailed,
}

/// Mock signer for testing.
///
/// Returns fixed [`SignedParams`] and records the parameters it was asked
/// to sign.
pub struct MockSigner {
    signed: SignedParams,
    failure: Mutex<Option<SignerFailure>>,
    sign_count: AtomicUsize,
    sign_requests: Mutex<Vec<BTreeMap<String, String>>>,
}

impl MockSigner {
    /// API key returned by the mock.
    pub const API_KEY: &'static str = "123456789012345";
    /// Timestamp returned by the mock.
    pub const TIMESTAMP: i64 = 1_700_000_000;
    /// Signature returned by the mock.
    pub const SIGNATURE: &'static str = "a1b2c3d4e5f60718293a4b5c6d7e8f9012345678";

    /// Create a new mock signer.
    pub fn new() -> Self {
        Self::with_signed(SignedParams {
            api_key: Self::API_KEY.to_string(),
            timestamp: Self::TIMESTAMP,
            signature: Self::SIGNATURE.to_string(),
        })
    }

    /// Create a mock signer returning the given values.
    pub fn with_signed(signed: SignedParams) -> Self {
        Self {
            signed,
            failure: Mutex::new(None),
            sign_count: AtomicUsize::new(0),
            sign_requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock signer that always fails.
    pub fn failing(failure: SignerFailure) -> Self {
        let signer = Self::new();
        signer.set_failure(Some(failure));
        signer
    }

    /// Set or clear the failure mode.
    pub fn set_failure(&self, failure: Option<SignerFailure>) {
        *self.failure.lock() = failure;
    }

    /// Get the number of sign calls.
    pub fn sign_count(&self) -> usize {
        self.sign_count.load(Ordering::SeqCst)
    }

    /// Get the recorded parameter sets.
    pub fn sign_requests(&self) -> Vec<BTreeMap<String, String>> {
        self.sign_requests.lock().clone()
    }
}

impl Default for MockSigner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RequestSigner for MockSigner {
    async fn sign(&self, params: &BTreeMap<String, String>) -> Result<SignedParams, CloudinaryError> {
        self.sign_count.fetch_add(1, Ordering::SeqCst);
        self.sign_requests.lock().push(params.clone());

        let failure = *self.failure.lock();
        match failure {
            None => Ok(self.signed.clone()),
            Some(SignerFailure::MissingCredentials) => Err(CredentialsError::NotFound.into()),
            Some(SignerFailure::BackendFailed) => Err(SigningError::BackendFailed {
                backend: "mock",
                message: "digest unavailable".to_string(),
            }
            .into()),
        }
    }
}

impl std::fmt::Debug for MockSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockSigner")
            .field("failure", &*self.failure.lock())
            .field("sign_count", &self.sign_count())
            .finish()
    }
}
