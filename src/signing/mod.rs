//! Upload signature generation.
//!
//! A signature is the lowercase hex SHA-1 of the string to sign: the upload
//! parameters sorted by name, joined as `key=value` pairs with `&`, with the
//! API secret appended directly. The remote verifier applies the same rule,
//! so the construction must match byte for byte.

mod canonical;
mod sha1;
mod signer;

pub use canonical::{build_canonical_params, build_string_to_sign, UNSIGNED_PARAMS};
pub use sha1::{FallbackSha1, RingSha1, Sha1Backend, Sha1Digest, SoftSha1, SHA1_OUTPUT_LEN};
pub use signer::{ApiSecretSigner, RequestSigner, SignedParams};

use crate::error::SigningError;
use std::collections::BTreeMap;

/// Name of the timestamp parameter.
pub const TIMESTAMP_PARAM: &str = "timestamp";

/// Sign a parameter set with the given secret and backend.
pub fn sign_params(
    params: &BTreeMap<String, String>,
    api_secret: &str,
    backend: &dyn Sha1Backend,
) -> Result<String, SigningError> {
    let string_to_sign = build_string_to_sign(params, api_secret);
    backend.hex_digest(string_to_sign.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_params() -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        params.insert("folder".to_string(), "college/faculty".to_string());
        params.insert(TIMESTAMP_PARAM.to_string(), "1700000000".to_string());
        params
    }

    #[test]
    fn test_sign_params_matches_manual_digest() {
        let signature = sign_params(&sample_params(), "secret", &RingSha1).unwrap();
        let expected = SoftSha1
            .hex_digest(b"folder=college/faculty&timestamp=1700000000secret")
            .unwrap();
        assert_eq!(signature, expected);
        assert_eq!(signature.len(), 40);
        assert!(signature.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_sign_params_backends_agree() {
        let params = sample_params();
        assert_eq!(
            sign_params(&params, "secret", &RingSha1).unwrap(),
            sign_params(&params, "secret", &SoftSha1).unwrap()
        );
    }

    #[test]
    fn test_sign_params_deterministic() {
        let params = sample_params();
        let backend = FallbackSha1::default();
        let first = sign_params(&params, "secret", &backend).unwrap();
        for _ in 0..10 {
            assert_eq!(sign_params(&params, "secret", &backend).unwrap(), first);
        }
    }

    #[test]
    fn test_sign_params_secret_changes_signature() {
        let params = sample_params();
        assert_ne!(
            sign_params(&params, "one", &RingSha1).unwrap(),
            sign_params(&params, "two", &RingSha1).unwrap()
        );
    }
}
