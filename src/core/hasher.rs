//! SHA-256 digests for implicit digest components.

use sha2::{Digest, Sha256};

use crate::types::SHA256_DIGEST_SIZE;

/// SHA-256 of `data`.
///
/// This is the value carried by an implicit digest component, computed over
/// the full wire encoding of the packet the name refers to.
pub fn sha256_digest(data: &[u8]) -> [u8; SHA256_DIGEST_SIZE] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Lower-case hex rendering of a digest, as used in the URI form.
pub fn digest_to_hex(digest: &[u8]) -> String {
    hex::encode(digest)
}

/// Parse a hex digest, accepting either case.
pub fn digest_from_hex(hex_str: &str) -> Option<Vec<u8>> {
    hex::decode(hex_str).ok()
}
