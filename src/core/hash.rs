//! SHA-1 checks for freshly downloaded artifacts.
//!
//! Only bytes that were just fetched are hashed. Files already in the cache
//! are trusted by presence alone.

use sha1::{Digest, Sha1};

use crate::error::{Error, Result};

/// Hex-encoded SHA-1 of `bytes`.
pub fn sha1_hex(bytes: &[u8]) -> String {
    hex::encode(Sha1::digest(bytes))
}

/// Check `bytes` fetched from `url` against the declared `expected` digest.
///
/// An empty `expected` means the metadata declared no checksum; that passes.
pub fn verify_sha1(url: &str, bytes: &[u8], expected: &str) -> Result<()> {
    if expected.is_empty() {
        return Ok(());
    }

    let actual = sha1_hex(bytes);
    if actual != expected.to_lowercase() {
        return Err(Error::ChecksumMismatch {
            url: url.to_string(),
            expected: expected.to_lowercase(),
            actual,
        });
    }
    Ok(())
}
