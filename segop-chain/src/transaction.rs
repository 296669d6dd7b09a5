//! The extended ("segOP") transaction: a Bitcoin-style transaction with an
//! optional length-delimited payload lane and the three identifiers
//! derived from it.

mod serialize;

#[cfg(any(test, feature = "proptest-impl"))]
mod arbitrary;
#[cfg(test)]
mod tests;

use std::fmt;

use bitcoin_serde_derive::{BtcDeserialize, BtcSerialize};
use serde::{Deserialize, Serialize};

#[cfg(any(test, feature = "proptest-impl"))]
use proptest_derive::Arbitrary;

use crate::{
    cached::Cached,
    serialization::sha256d,
    tagged_hash::tagged_hash,
    transparent::{Input, Output},
    BitcoinDeserialize, BitcoinSerialize, SerializationError,
};

pub use serialize::TxOutProfile;

macro_rules! txid_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, BtcSerialize, BtcDeserialize,
        )]
        #[cfg_attr(any(test, feature = "proptest-impl"), derive(Arbitrary))]
        pub struct $name(pub [u8; 32]);

        impl $name {
            pub fn from_bytes(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }

            pub fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                let mut reversed = self.0;
                reversed.reverse();
                f.write_str(&hex::encode(reversed))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.debug_tuple(stringify!($name))
                    .field(&self.to_string())
                    .finish()
            }
        }
    };
}

txid_newtype!(
    Txid,
    "The legacy, payload-stripped, non-witness transaction id."
);
txid_newtype!(
    Wtxid,
    "The witness-aware, payload-stripped transaction id; equal to the legacy txid when no witness is present."
);
txid_newtype!(
    Fullxid,
    "The full extended transaction id, covering the payload; the only identifier that uniquely binds payload variants."
);

/// The optional extended payload carried in a transaction's segOP lane.
///
/// Null (`version == 0`, `data` empty) is a distinct, representable state
/// rather than the absence of a `Payload` value.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[cfg_attr(any(test, feature = "proptest-impl"), derive(Arbitrary))]
pub struct Payload {
    pub version: u8,
    pub data: Vec<u8>,
}

impl Payload {
    pub const VERSION_1: u8 = 1;

    pub fn null() -> Self {
        Payload {
            version: 0,
            data: Vec::new(),
        }
    }

    pub fn present(version: u8, data: Vec<u8>) -> Self {
        Payload { version, data }
    }

    pub fn is_null(&self) -> bool {
        self.version == 0 && self.data.is_empty()
    }

    pub fn is_present(&self) -> bool {
        !self.is_null()
    }
}

impl Default for Payload {
    fn default() -> Self {
        Payload::null()
    }
}

/// A segOP transaction.
///
/// Immutable once constructed: [`Transaction::new`] finalizes the value by
/// computing and caching `txid`/`wtxid`/`fullxid` eagerly, collapsing §3's
/// "constructed mutable, then finalized" lifecycle into a single
/// constructor call -- there is no mutation API on this type; building a
/// different transaction means building a new one.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct Transaction {
    pub version: u32,
    pub inputs: Vec<Input>,
    pub outputs: Vec<Output>,
    pub lock_time: u32,
    pub payload: Payload,

    txid: Cached<Txid>,
    wtxid: Cached<Wtxid>,
    fullxid: Cached<Fullxid>,
}

impl Transaction {
    /// Build and finalize a transaction from its parts.
    pub fn new(
        version: u32,
        inputs: Vec<Input>,
        outputs: Vec<Output>,
        lock_time: u32,
        payload: Payload,
    ) -> Self {
        let mut tx = Transaction {
            version,
            inputs,
            outputs,
            lock_time,
            payload,
            txid: Cached::new(),
            wtxid: Cached::new(),
            fullxid: Cached::new(),
        };
        tx.finalize();
        tx
    }

    /// Compute and cache the three identifiers. Idempotent.
    fn finalize(&mut self) {
        self.txid = Cached::from(self.compute_txid());
        self.wtxid = Cached::from(self.compute_wtxid());
        self.fullxid = Cached::from(self.compute_fullxid());
    }

    /// A copy of this transaction with its extended payload cleared, used
    /// by both payload-stripped identifiers.
    fn payload_stripped(&self) -> Transaction {
        Transaction {
            version: self.version,
            inputs: self.inputs.clone(),
            outputs: self.outputs.clone(),
            lock_time: self.lock_time,
            payload: Payload::null(),
            txid: Cached::new(),
            wtxid: Cached::new(),
            fullxid: Cached::new(),
        }
    }

    pub(crate) fn has_witness(&self) -> bool {
        self.inputs
            .iter()
            .any(|input| !input.witness_stack.is_empty())
    }

    fn compute_txid(&self) -> Txid {
        let stripped = self.payload_stripped();
        let mut writer = sha256d::Writer::default();
        stripped
            .serialize_profile(&mut writer, TxOutProfile::NoWitness)
            .expect("hashing into memory is infallible");
        Txid(writer.finish())
    }

    fn compute_wtxid(&self) -> Wtxid {
        if !self.has_witness() {
            return Wtxid(self.compute_txid().0);
        }
        let stripped = self.payload_stripped();
        let mut writer = sha256d::Writer::default();
        stripped
            .serialize_profile(&mut writer, TxOutProfile::WithWitness)
            .expect("hashing into memory is infallible");
        Wtxid(writer.finish())
    }

    fn compute_fullxid(&self) -> Fullxid {
        let bytes = self
            .serialize_profile_to_vec(TxOutProfile::WithWitness)
            .expect("serializing into memory is infallible");
        Fullxid(tagged_hash("segop:fullxid", &bytes))
    }

    /// The legacy, payload-stripped, non-witness transaction id.
    pub fn txid(&self) -> Txid {
        self.txid.value().unwrap_or_else(|| self.compute_txid())
    }

    /// The witness-aware, payload-stripped transaction id.
    pub fn wtxid(&self) -> Wtxid {
        self.wtxid.value().unwrap_or_else(|| self.compute_wtxid())
    }

    /// The full extended transaction id, covering the payload.
    pub fn fullxid(&self) -> Fullxid {
        self.fullxid
            .value()
            .unwrap_or_else(|| self.compute_fullxid())
    }

    /// Whether this transaction is a coinbase transaction: exactly one
    /// input, with a null previous-output reference.
    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].prev_outpoint.is_null()
    }

    pub fn contains_coinbase_input(&self) -> bool {
        self.inputs
            .iter()
            .any(|input| input.prev_outpoint.is_null())
    }

    /// The on-disk serialization profile this transaction would use, per
    /// the persisted-state rule of §6: extended when witness or payload
    /// data is present, legacy otherwise.
    pub fn persisted_profile(&self) -> TxOutProfile {
        if self.has_witness() || self.payload.is_present() {
            TxOutProfile::WithWitness
        } else {
            TxOutProfile::NoWitness
        }
    }

    pub fn serialize_persisted(&self) -> Result<Vec<u8>, std::io::Error> {
        self.serialize_profile_to_vec(self.persisted_profile())
    }

    /// The byte length of the non-witness profile, used by the weight cap
    /// check in `segop-consensus`.
    pub fn non_witness_len(&self) -> usize {
        self.serialize_profile_to_vec(TxOutProfile::NoWitness)
            .map(|bytes| bytes.len())
            .unwrap_or(0)
    }
}
