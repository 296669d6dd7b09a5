use std::io::Cursor;

use proptest::prelude::*;

use crate::serialization::{BitcoinDeserialize, BitcoinSerialize};

use super::super::{Transaction, TxOutProfile};

proptest! {
    /// A transaction serialized in its persisted profile (§6: extended when
    /// witness or payload data is present, legacy otherwise) deserializes
    /// back to an equal transaction with identical cached identifiers.
    #[test]
    fn transaction_roundtrip(tx in any::<Transaction>()) {
        segop_test::init();

        let data = tx.bitcoin_serialize_to_vec().expect("tx should serialize");
        let tx2 = Transaction::bitcoin_deserialize(Cursor::new(&data[..]))
            .expect("encoded tx should deserialize");

        prop_assert_eq![&tx, &tx2];
        prop_assert_eq![tx.txid(), tx2.txid()];
        prop_assert_eq![tx.wtxid(), tx2.wtxid()];
        prop_assert_eq![tx.fullxid(), tx2.fullxid()];
    }

    /// Explicitly round-tripping the non-witness profile always succeeds,
    /// since it has no marker/flag ambiguity to resolve.
    #[test]
    fn non_witness_profile_roundtrip(tx in any::<Transaction>()) {
        segop_test::init();

        let bytes = tx.serialize_profile_to_vec(TxOutProfile::NoWitness)
            .expect("non-witness profile should serialize");
        let decoded = Transaction::bitcoin_deserialize(Cursor::new(&bytes[..]))
            .expect("non-witness profile should deserialize");

        // A non-witness round trip strips witness stacks and the payload, so
        // only the identifier that is blind to both is guaranteed to match.
        prop_assert_eq![tx.txid(), decoded.txid()];
    }

    /// Changing a single byte of a present payload changes the full extended
    /// id while leaving the legacy txid untouched (§8's determinism property).
    #[test]
    fn payload_byte_flip_changes_fullxid_not_txid(
        tx in any::<Transaction>(),
        flip_byte in any::<u8>().prop_filter("non-zero flip", |b| *b != 0),
    ) {
        segop_test::init();

        if tx.payload.data.is_empty() {
            return Ok(());
        }

        let mut flipped = tx.clone();
        flipped.payload.data[0] ^= flip_byte;
        let flipped = Transaction::new(
            flipped.version,
            flipped.inputs,
            flipped.outputs,
            flipped.lock_time,
            flipped.payload,
        );

        prop_assert_eq![tx.txid(), flipped.txid()];
        prop_assert_ne![tx.fullxid(), flipped.fullxid()];
    }
}
