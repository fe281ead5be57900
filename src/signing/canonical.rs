//! Canonical string-to-sign construction.

use std::collections::BTreeMap;

/// Parameters that are sent with an upload but never signed.
pub const UNSIGNED_PARAMS: &[&str] = &["file", "api_key", "signature", "resource_type", "cloud_name"];

/// Build the sorted `key=value&key=value` parameter string.
///
/// Keys are ordered by byte value. Empty values and keys in
/// [`UNSIGNED_PARAMS`] are skipped.
pub fn build_canonical_params(params: &BTreeMap<String, String>) -> String {
    params
        .iter()
        .filter(|(key, value)| !value.is_empty() && !UNSIGNED_PARAMS.contains(&key.as_str()))
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&")
}

/// Build the string to sign: canonical parameters with the secret appended
/// directly, no separator.
pub fn build_string_to_sign(params: &BTreeMap<String, String>, api_secret: &str) -> String {
    let mut out = build_canonical_params(params);
    out.push_str(api_secret);
    out
}
