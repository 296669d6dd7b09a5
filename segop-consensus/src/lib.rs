//! Structural consensus validation for the extended ("segOP") transaction
//! format: the rules that bind an extended payload to its commitment
//! output and enforce the standard transparent-transaction invariants.
//!
//! This crate is purely functional: [`transaction::check_structure`] takes
//! a finalized `segop_chain::Transaction` and returns `Ok(())` or a
//! [`TransactionError`] drawn from a closed taxonomy. It performs no I/O,
//! consults no UTXO set, and is safe to call concurrently on distinct
//! transactions from any number of threads.
//!
//! Everything outside "does this transaction's shape satisfy the wire
//! contract" -- script execution, signature checks, UTXO lookups, mempool
//! admission -- belongs to the host node, not this crate.

pub mod error;
pub mod parameters;
pub mod transaction;

pub use error::TransactionError;
pub use transaction::check_structure;
