//! Consensus parameters for structural transaction validation.
//!
//! These are the recommended defaults for §4.E's checks; a host is free
//! to override them at the call site, but every node on the same network
//! must agree on the same values or risk a chain split.

/// Maximum size, in bytes, of a segOP payload's `data` field.
///
/// The authoritative value; an older revision of this protocol used
/// 100,000 and is superseded.
pub const MAX_SEGOP_PAYLOAD_SIZE: usize = 64_000;

/// Weight multiplier applied to non-witness transaction bytes.
pub const WITNESS_SCALE_FACTOR: usize = 4;

/// Maximum total transaction weight permitted in a block.
pub const MAX_BLOCK_WEIGHT: usize = 4_000_000;

/// Valid range for a coinbase input's scriptSig length, in bytes.
pub const MAX_COINBASE_SCRIPTSIG_SIZE: usize = 100;
pub const MIN_COINBASE_SCRIPTSIG_SIZE: usize = 2;

/// Maximum representable money value, in the smallest unit.
pub const MAX_MONEY: i64 = 21_000_000 * 100_000_000;
