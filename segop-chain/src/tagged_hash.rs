//! Domain-separated tagged hashing.
//!
//! `tagged_hash(tag, msg) = SHA256(SHA256(tag) || SHA256(tag) || msg)`, used
//! both for the commitment-output preimage (tag `"segop:commitment"`) and
//! the full extended transaction id (tag `"segop:fullxid"`). Precomputing
//! `SHA256(tag)` once per call keeps every caller's hash prefix distinct
//! without requiring a length-prefixed tag on the wire.

use sha2::{Digest, Sha256};

/// Compute the tagged hash of `msg` under `tag`.
pub fn tagged_hash(tag: &str, msg: &[u8]) -> [u8; 32] {
    let tag_hash = Sha256::digest(tag.as_bytes());

    let mut hasher = Sha256::new();
    hasher.update(&tag_hash);
    hasher.update(&tag_hash);
    hasher.update(msg);

    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_tags_diverge() {
        let msg = b"identical payload";
        let a = tagged_hash("segop:commitment", msg);
        let b = tagged_hash("segop:fullxid", msg);
        assert_ne!(a, b);
    }

    #[test]
    fn deterministic() {
        let msg = b"some bytes";
        assert_eq!(
            tagged_hash("segop:commitment", msg),
            tagged_hash("segop:commitment", msg)
        );
    }
}
