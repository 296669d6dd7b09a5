//! The closed taxonomy of reasons a transaction can fail structural
//! validation.
//!
//! Every variant here is fatal: the host never retries a transaction
//! in-place after one of these, only re-validates a different transaction
//! (see the data-model lifecycle note in `segop_chain::transaction`). Each
//! variant's doc comment doubles as its `Display` message, via
//! `displaydoc`; the trailing `bad-txns-*` / `bad-cb-*` tag mirrors the
//! rejection reason a Bitcoin-style node logs and uses for peer-penalty
//! accounting.
use displaydoc::Display;
use thiserror::Error;

/// Why a transaction failed structural validation.
#[derive(Display, Error, Debug, Clone, Copy, Eq, PartialEq)]
pub enum TransactionError {
    /// transaction has no inputs (bad-txns-vin-empty)
    EmptyInputs,
    /// transaction has no outputs (bad-txns-vout-empty)
    EmptyOutputs,
    /// non-witness weight exceeds the block weight cap (bad-txns-oversize)
    Oversize,
    /// segOP payload version is not 1 (bad-txns-segop-version)
    PayloadVersion,
    /// segOP payload data exceeds the maximum payload size (bad-txns-segop-toolarge)
    PayloadTooLarge,
    /// segOP payload data is not a well-formed TLV sequence (bad-txns-segop-tlv)
    PayloadTLV,
    /// transaction does not contain exactly one correct commitment output for its segOP payload (bad-txns-segop-no-p2sop)
    CommitmentMismatch,
    /// transaction has a commitment-looking output but no segOP payload (bad-txns-segop-p2sop-without-segop)
    UnexpectedCommitment,
    /// an output value is outside the valid money range (bad-txns-vout-negative)
    NegativeOutput,
    /// the running total of output values leaves the valid money range (bad-txns-vout-toolarge)
    OutputTotalOverflow,
    /// two inputs reference the same previous output (bad-txns-inputs-duplicate)
    DuplicateInput,
    /// a non-coinbase input has a null previous-output reference (bad-txns-prevout-null)
    NullPrevout,
    /// a coinbase input's scriptSig length is out of range (bad-cb-length)
    CoinbaseLength,
}
