//! Data model, wire format, and identifier rules for the extended
//! ("segOP") transaction format: a Bitcoin-style transaction extended with
//! an optional length-delimited payload lane and a commitment output that
//! binds that payload to the legacy transaction body.
//!
//! This crate owns everything that is purely about *shape*: how bytes on
//! the wire turn into a `Transaction`, and how a `Transaction` turns back
//! into bytes and into its three identifiers (`txid`, `wtxid`, `fullxid`).
//! It does not decide whether a transaction is valid against any other
//! transaction or any chain state -- that's `segop-consensus` -- and it does
//! not interpret payload contents -- that's `segop-classify`.

pub mod cached;
pub mod commitment;
pub mod compact_size;
pub mod serialization;
pub mod tagged_hash;
pub mod tlv;
pub mod transaction;
pub mod transparent;

pub use cached::Cached;
pub use compact_size::CompactSize;
pub use serialization::{BitcoinDeserialize, BitcoinDeserializeInto, BitcoinSerialize, SerializationError};
pub use transaction::{Transaction, TxOutProfile};
pub use transparent::{Input, OutPoint, Output};
