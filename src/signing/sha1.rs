//! SHA-1 backends.
//!
//! `RingSha1` uses the platform primitive from `ring`. `SoftSha1` is a
//! bundled implementation of FIPS 180-4 used when the primary backend is
//! unavailable. Both must produce identical digests.

use crate::error::SigningError;
use std::fmt;
use tracing::warn;

/// Length of a SHA-1 digest in bytes.
pub const SHA1_OUTPUT_LEN: usize = 20;

/// A SHA-1 digest.
pub type Sha1Digest = [u8; SHA1_OUTPUT_LEN];

/// A strategy for computing SHA-1 digests.
pub trait Sha1Backend: Send + Sync {
    /// Compute the SHA-1 digest of `data`.
    fn digest(&self, data: &[u8]) -> Result<Sha1Digest, SigningError>;

    /// Backend name for logging.
    fn name(&self) -> &'static str;

    /// Compute the digest and encode it as lowercase hex.
    fn hex_digest(&self, data: &[u8]) -> Result<String, SigningError> {
        self.digest(data).map(hex::encode)
    }
}

/// SHA-1 backed by `ring`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RingSha1;

impl Sha1Backend for RingSha1 {
    fn digest(&self, data: &[u8]) -> Result<Sha1Digest, SigningError> {
        let digest = ring::digest::digest(&ring::digest::SHA1_FOR_LEGACY_USE_ONLY, data);
        digest
            .as_ref()
            .try_into()
            .map_err(|_| SigningError::BackendFailed {
                backend: self.name(),
                message: format!("unexpected digest length {}", digest.as_ref().len()),
            })
    }

    fn name(&self) -> &'static str {
        "ring"
    }
}

/// Bundled SHA-1 implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoftSha1;

const H0: [u32; 5] = [0x6745_2301, 0xEFCD_AB89, 0x98BA_DCFE, 0x1032_5476, 0xC3D2_E1F0];

impl SoftSha1 {
    /// Compute the digest. Infallible.
    pub fn compute(data: &[u8]) -> Sha1Digest {
        let mut state = H0;

        let mut chunks = data.chunks_exact(64);
        for block in &mut chunks {
            compress(&mut state, block);
        }

        // Padding: 0x80, zeros, then the message length in bits (big-endian u64).
        let remainder = chunks.remainder();
        let bit_len = (data.len() as u64).wrapping_mul(8);
        let mut tail = [0u8; 128];
        tail[..remainder.len()].copy_from_slice(remainder);
        tail[remainder.len()] = 0x80;
        let tail_len = if remainder.len() < 56 { 64 } else { 128 };
        tail[tail_len - 8..tail_len].copy_from_slice(&bit_len.to_be_bytes());
        for block in tail[..tail_len].chunks_exact(64) {
            compress(&mut state, block);
        }

        let mut out = [0u8; SHA1_OUTPUT_LEN];
        for (chunk, word) in out.chunks_exact_mut(4).zip(state.iter()) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        out
    }
}

fn compress(state: &mut [u32; 5], block: &[u8]) {
    let mut w = [0u32; 80];
    for (i, word) in block.chunks_exact(4).enumerate() {
        w[i] = u32::from_be_bytes([word[0], word[1], word[2], word[3]]);
    }
    for i in 16..80 {
        w[i] = (w[i - 3] ^ w[i - 8] ^ w[i - 14] ^ w[i - 16]).rotate_left(1);
    }

    let [mut a, mut b, mut c, mut d, mut e] = *state;

    for (i, &wi) in w.iter().enumerate() {
        let (f, k) = match i {
            0..=19 => ((b & c) | (!b & d), 0x5A82_7999),
            20..=39 => (b ^ c ^ d, 0x6ED9_EBA1),
            40..=59 => ((b & c) | (b & d) | (c & d), 0x8F1B_BCDC),
            _ => (b ^ c ^ d, 0xCA62_C1D6),
        };
        let temp = a
            .rotate_left(5)
            .wrapping_add(f)
            .wrapping_add(e)
            .wrapping_add(k)
            .wrapping_add(wi);
        e = d;
        d = c;
        c = b.rotate_left(30);
        b = a;
        a = temp;
    }

    state[0] = state[0].wrapping_add(a);
    state[1] = state[1].wrapping_add(b);
    state[2] = state[2].wrapping_add(c);
    state[3] = state[3].wrapping_add(d);
    state[4] = state[4].wrapping_add(e);
}

impl Sha1Backend for SoftSha1 {
    fn digest(&self, data: &[u8]) -> Result<Sha1Digest, SigningError> {
        Ok(Self::compute(data))
    }

    fn name(&self) -> &'static str {
        "soft"
    }
}

/// Tries a primary backend and falls back to [`SoftSha1`] on error.
pub struct FallbackSha1 {
    primary: Box<dyn Sha1Backend>,
    fallback: SoftSha1,
}

impl FallbackSha1 {
    /// Wrap a primary backend.
    pub fn new(primary: Box<dyn Sha1Backend>) -> Self {
        Self {
            primary,
            fallback: SoftSha1,
        }
    }

    /// Name of the primary backend.
    pub fn primary_name(&self) -> &'static str {
        self.primary.name()
    }
}

impl Default for FallbackSha1 {
    fn default() -> Self {
        Self::new(Box::new(RingSha1))
    }
}

impl Sha1Backend for FallbackSha1 {
    fn digest(&self, data: &[u8]) -> Result<Sha1Digest, SigningError> {
        match self.primary.digest(data) {
            Ok(digest) => Ok(digest),
            Err(error) => {
                warn!(
                    primary = self.primary.name(),
                    error = %error,
                    "SHA-1 primary backend failed, using bundled implementation"
                );
                self.fallback.digest(data)
            }
        }
    }

    fn name(&self) -> &'static str {
        "fallback"
    }
}

impl fmt::Debug for FallbackSha1 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FallbackSha1")
            .field("primary", &self.primary.name())
            .finish()
    }
}
