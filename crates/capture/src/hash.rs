//! Content hashing for duplicate-frame detection.

use sha2::{Digest, Sha256};

/// Digest of one captured frame, compared only for equality with the
/// previous frame's digest. Two different slides rendering to the same
/// digest would read as "duplicate" and end the run early; that is an
/// accepted approximation of this scheme, not a cryptographic claim.
pub type ContentHash = [u8; 32];

/// Hash the raw bytes of a captured frame.
pub fn content_hash(bytes: &[u8]) -> ContentHash {
    Sha256::digest(bytes).into()
}
