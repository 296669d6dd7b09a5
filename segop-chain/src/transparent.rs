//! Transparent (non-shielded, Bitcoin-inherited) transaction parts:
//! previous-output references, inputs, and outputs.
#![allow(clippy::unit_arg)]

mod script;

pub use script::Script;

use std::io;

use bitcoin_serde_derive::{BtcDeserialize, BtcSerialize};
use serde::{Deserialize, Serialize};

#[cfg(any(test, feature = "proptest-impl"))]
use proptest_derive::Arbitrary;

use crate::{
    compact_size::CompactSize,
    serialization::{BitcoinDeserialize, BitcoinSerialize, SerializationError},
    transaction::Txid,
};

/// A reference to a previous transaction output.
///
/// `is_null` follows the standard convention for "this is the coinbase
/// slot": an all-zero `prev_txid` paired with `prev_index == u32::MAX`.
#[derive(
    Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, BtcSerialize, BtcDeserialize,
)]
#[cfg_attr(any(test, feature = "proptest-impl"), derive(Arbitrary))]
pub struct OutPoint {
    pub prev_txid: Txid,
    pub prev_index: u32,
}

impl OutPoint {
    /// Encoded length in bytes: a 32-byte txid plus a 4-byte index.
    #[inline]
    pub const fn len() -> usize {
        36
    }

    pub fn null() -> OutPoint {
        OutPoint {
            prev_txid: Txid([0u8; 32]),
            prev_index: u32::MAX,
        }
    }

    pub fn is_null(&self) -> bool {
        self.prev_txid.0 == [0u8; 32] && self.prev_index == u32::MAX
    }
}

/// A transparent input.
///
/// `witness_stack` is deliberately excluded from `BitcoinSerialize`: per
/// §4.D the witness data for every input is grouped into its own section
/// after `vout`, not interleaved with the `vin` array. The transaction
/// serializer writes/reads that section directly; an `Input` parsed on its
/// own always comes back with an empty witness stack.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[cfg_attr(any(test, feature = "proptest-impl"), derive(Arbitrary))]
pub struct Input {
    pub prev_outpoint: OutPoint,
    pub script_sig: Script,
    pub sequence: u32,
    pub witness_stack: Vec<Vec<u8>>,
}

impl Input {
    pub fn new(prev_outpoint: OutPoint, script_sig: Script, sequence: u32) -> Input {
        Input {
            prev_outpoint,
            script_sig,
            sequence,
            witness_stack: Vec::new(),
        }
    }

    pub fn with_witness(mut self, witness_stack: Vec<Vec<u8>>) -> Input {
        self.witness_stack = witness_stack;
        self
    }

    /// Encoded length of this input's `vin` entry, excluding any witness
    /// data (which lives in a separate section and has no fixed relation
    /// to input order length-wise).
    pub fn len(&self) -> usize {
        OutPoint::len() + self.script_sig.serialized_size() + 4
    }
}

impl BitcoinSerialize for Input {
    fn bitcoin_serialize<W: io::Write>(&self, mut writer: W) -> Result<(), io::Error> {
        self.prev_outpoint.bitcoin_serialize(&mut writer)?;
        self.script_sig.bitcoin_serialize(&mut writer)?;
        self.sequence.bitcoin_serialize(&mut writer)?;
        Ok(())
    }
}

impl BitcoinDeserialize for Input {
    fn bitcoin_deserialize<R: io::Read>(mut reader: R) -> Result<Self, SerializationError> {
        let prev_outpoint = OutPoint::bitcoin_deserialize(&mut reader)?;
        let script_sig = Script::bitcoin_deserialize(&mut reader)?;
        let sequence = u32::bitcoin_deserialize(&mut reader)?;
        Ok(Input {
            prev_outpoint,
            script_sig,
            sequence,
            witness_stack: Vec::new(),
        })
    }
}

/// Write a single input's witness stack: `CompactSize(stack_len) ‖
/// (CompactSize(item_len) ‖ item_bytes)*`.
pub(crate) fn write_witness_stack<W: io::Write>(
    stack: &[Vec<u8>],
    mut writer: W,
) -> Result<(), io::Error> {
    CompactSize::from(stack.len()).bitcoin_serialize(&mut writer)?;
    for item in stack {
        item.bitcoin_serialize(&mut writer)?;
    }
    Ok(())
}

/// Read a single input's witness stack, the inverse of
/// [`write_witness_stack`].
pub(crate) fn read_witness_stack<R: io::Read>(
    mut reader: R,
) -> Result<Vec<Vec<u8>>, SerializationError> {
    let count = CompactSize::bitcoin_deserialize(&mut reader)?.value() as usize;
    let blind_alloc_limit = 1024;
    let mut stack = Vec::with_capacity(std::cmp::min(count, blind_alloc_limit));
    for _ in 0..count {
        stack.push(Vec::<u8>::bitcoin_deserialize(&mut reader)?);
    }
    Ok(stack)
}

/// A transparent output.
#[derive(
    Clone, Debug, Eq, PartialEq, Serialize, Deserialize, BtcSerialize, BtcDeserialize,
)]
#[cfg_attr(any(test, feature = "proptest-impl"), derive(Arbitrary))]
pub struct Output {
    pub value: i64,
    pub script_pubkey: Script,
}

impl Output {
    /// Encoded length in bytes.
    pub fn len(&self) -> usize {
        8 + self.script_pubkey.serialized_size()
    }
}
