//! Content fingerprints for registered files.

use crate::types::ContentHash;
use std::path::Path;

/// Hash raw bytes with BLAKE3 and hex-encode the digest.
pub fn hash_bytes(bytes: &[u8]) -> ContentHash {
    hex::encode(blake3::hash(bytes).as_bytes())
}

/// Compute the fingerprint of the file at `path`.
pub fn compute_file_hash(path: &Path) -> Result<ContentHash, std::io::Error> {
    let bytes = std::fs::read(path)?;
    Ok(hash_bytes(&bytes))
}
