//! The segOP commitment blob: the 37 bytes a commitment output's
//! script-public-key must push, binding a payload's `data` to the
//! transaction that carries it.

use crate::tagged_hash::tagged_hash;

/// ASCII tag prefixing every commitment blob.
pub const P2SOP_TAG: &[u8; 5] = b"P2SOP";

/// Total length of a commitment blob: 5-byte tag + 32-byte tagged hash.
pub const COMMITMENT_LEN: usize = 37;

/// Compute `"P2SOP" ‖ TaggedHash("segop:commitment", data)`.
///
/// Pure: identical `data` yields identical output on every node, which is
/// the property the structural validator's commitment-output scan relies
/// on for bit-exact consensus.
pub fn build_commitment_blob(data: &[u8]) -> [u8; COMMITMENT_LEN] {
    let commitment = tagged_hash("segop:commitment", data);

    let mut blob = [0u8; COMMITMENT_LEN];
    blob[..5].copy_from_slice(P2SOP_TAG);
    blob[5..].copy_from_slice(&commitment);
    blob
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blob_has_expected_shape() {
        let blob = build_commitment_blob(b"hello");
        assert_eq!(blob.len(), COMMITMENT_LEN);
        assert_eq!(&blob[..5], P2SOP_TAG);
    }

    #[test]
    fn deterministic_across_calls() {
        assert_eq!(build_commitment_blob(b"abc"), build_commitment_blob(b"abc"));
    }

    #[test]
    fn distinct_payloads_diverge() {
        assert_ne!(build_commitment_blob(b"abc"), build_commitment_blob(b"abd"));
    }
}
