//! Structural transaction checks (§4.E).
//!
//! [`check_structure`] runs the fixed, ordered sequence of checks that
//! every node must apply identically: empty vin/vout, the non-witness
//! weight cap, segOP payload/commitment coupling, output value ranges,
//! duplicate inputs, and the coinbase/non-coinbase split. None of these
//! checks consult the UTXO set or any other transaction.

use std::collections::HashSet;

use segop_chain::{
    commitment::build_commitment_blob,
    tlv::is_valid_tlv,
    transaction::{Payload, Transaction},
};

use crate::{error::TransactionError, parameters::*};

/// `OP_RETURN` opcode byte.
const OP_RETURN: u8 = 0x6a;

/// `"P2SOP"` tag, the first five bytes an output must push to be
/// considered commitment-looking.
const P2SOP_TAG: &[u8; 5] = b"P2SOP";

/// Returns `true` iff `script` begins with `OP_RETURN ‖ push_len ‖ "P2SOP"`
/// and `push_len >= 5`. Does not check that `script`'s declared push
/// length actually matches its remaining bytes -- that distinction only
/// matters when deciding whether a commitment-looking output is the
/// *correct* one (see [`matches_commitment`]).
fn looks_like_commitment(script: &[u8]) -> bool {
    script.len() >= 2 + P2SOP_TAG.len()
        && script[0] == OP_RETURN
        && script[1] as usize >= P2SOP_TAG.len()
        && &script[2..2 + P2SOP_TAG.len()] == P2SOP_TAG
}

/// Returns `true` iff `script` is `OP_RETURN ‖ push_len ‖ expected` exactly:
/// the declared push length matches `expected`'s length, the script has no
/// extra trailing bytes, and the pushed bytes are byte-identical to
/// `expected`.
fn matches_commitment(script: &[u8], expected: &[u8]) -> bool {
    script.len() == 2 + expected.len()
        && script[1] as usize == expected.len()
        && &script[2..] == expected
}

/// Run the ordered structural checks of §4.E against a finalized
/// transaction.
///
/// Checks run in a fixed order so that the first rule a transaction
/// violates is the one reported, matching the reference node's
/// rejection-reason ordering byte-for-byte.
#[tracing::instrument(skip(tx), fields(txid = %tx.txid()))]
pub fn check_structure(tx: &Transaction) -> Result<(), TransactionError> {
    has_inputs_and_outputs(tx)?;
    weight_is_within_cap(tx)?;
    payload_commitment_coupling(tx)?;
    output_values_are_valid(tx)?;
    inputs_are_not_duplicated(tx)?;
    coinbase_shape_is_valid(tx)?;

    Ok(())
}

/// Checks 1-2: `vin` and `vout` are both non-empty.
fn has_inputs_and_outputs(tx: &Transaction) -> Result<(), TransactionError> {
    if tx.inputs.is_empty() {
        tracing::debug!("rejecting transaction with no inputs");
        return Err(TransactionError::EmptyInputs);
    }
    if tx.outputs.is_empty() {
        tracing::debug!("rejecting transaction with no outputs");
        return Err(TransactionError::EmptyOutputs);
    }
    Ok(())
}

/// Check 3: non-witness weight does not exceed the block weight cap.
///
/// The segOP payload is deliberately excluded from the non-witness
/// profile used here; it is still charged for at the block level via the
/// full serialization (§4.E note 3).
fn weight_is_within_cap(tx: &Transaction) -> Result<(), TransactionError> {
    let weight = tx.non_witness_len() * WITNESS_SCALE_FACTOR;
    if weight > MAX_BLOCK_WEIGHT {
        tracing::debug!(weight, cap = MAX_BLOCK_WEIGHT, "rejecting oversize transaction");
        return Err(TransactionError::Oversize);
    }
    Ok(())
}

/// Check 4/5: payload version, size, TLV validity, and the exactly-one-
/// commitment-output rule when a payload is present; no commitment-looking
/// output when it is absent.
fn payload_commitment_coupling(tx: &Transaction) -> Result<(), TransactionError> {
    if tx.payload.is_present() {
        check_present_payload(&tx.payload, tx)
    } else {
        check_absent_payload(tx)
    }
}

fn check_present_payload(payload: &Payload, tx: &Transaction) -> Result<(), TransactionError> {
    if payload.version != Payload::VERSION_1 {
        tracing::debug!(version = payload.version, "rejecting unsupported segOP payload version");
        return Err(TransactionError::PayloadVersion);
    }
    if payload.data.len() > MAX_SEGOP_PAYLOAD_SIZE {
        tracing::debug!(
            len = payload.data.len(),
            cap = MAX_SEGOP_PAYLOAD_SIZE,
            "rejecting oversize segOP payload"
        );
        return Err(TransactionError::PayloadTooLarge);
    }
    if !is_valid_tlv(&payload.data) {
        tracing::debug!("rejecting malformed segOP payload TLV");
        return Err(TransactionError::PayloadTLV);
    }

    let expected = build_commitment_blob(&payload.data);

    let mut correct = 0usize;
    let mut any_wrong = false;
    for output in &tx.outputs {
        let script = output.script_pubkey.as_bytes();
        if !looks_like_commitment(script) {
            continue;
        }
        if matches_commitment(script, &expected) {
            correct += 1;
        } else {
            any_wrong = true;
        }
    }

    if any_wrong || correct != 1 {
        tracing::debug!(correct, any_wrong, "rejecting segOP commitment mismatch");
        return Err(TransactionError::CommitmentMismatch);
    }

    Ok(())
}

fn check_absent_payload(tx: &Transaction) -> Result<(), TransactionError> {
    let has_commitment_looking = tx
        .outputs
        .iter()
        .any(|output| looks_like_commitment(output.script_pubkey.as_bytes()));
    if has_commitment_looking {
        tracing::debug!("rejecting unexpected commitment output with no segOP payload");
        return Err(TransactionError::UnexpectedCommitment);
    }
    Ok(())
}

/// Check 6: every output value, and the running total, stay in
/// `[0, MAX_MONEY]`.
fn output_values_are_valid(tx: &Transaction) -> Result<(), TransactionError> {
    let mut total: i64 = 0;
    for output in &tx.outputs {
        if output.value < 0 || output.value > MAX_MONEY {
            tracing::debug!(value = output.value, "rejecting out-of-range output value");
            return Err(TransactionError::NegativeOutput);
        }
        total = total
            .checked_add(output.value)
            .filter(|total| *total <= MAX_MONEY)
            .ok_or_else(|| {
                tracing::debug!("rejecting output total outside the valid money range");
                TransactionError::OutputTotalOverflow
            })?;
    }
    Ok(())
}

/// Check 7: no two inputs reference the same previous output.
fn inputs_are_not_duplicated(tx: &Transaction) -> Result<(), TransactionError> {
    let mut seen = HashSet::with_capacity(tx.inputs.len());
    for input in &tx.inputs {
        if !seen.insert((input.prev_outpoint.prev_txid, input.prev_outpoint.prev_index)) {
            tracing::debug!("rejecting transaction with duplicate inputs");
            return Err(TransactionError::DuplicateInput);
        }
    }
    Ok(())
}

/// Check 8: a coinbase transaction's sole input has a scriptSig length in
/// `[2, MAX_COINBASE_SCRIPTSIG_SIZE]`; a non-coinbase transaction has no
/// null previous-output references.
fn coinbase_shape_is_valid(tx: &Transaction) -> Result<(), TransactionError> {
    if tx.is_coinbase() {
        let len = tx.inputs[0].script_sig.as_bytes().len();
        if !(MIN_COINBASE_SCRIPTSIG_SIZE..=MAX_COINBASE_SCRIPTSIG_SIZE).contains(&len) {
            tracing::debug!(len, "rejecting coinbase with invalid scriptSig length");
            return Err(TransactionError::CoinbaseLength);
        }
    } else {
        for input in &tx.inputs {
            if input.prev_outpoint.is_null() {
                tracing::debug!("rejecting non-coinbase transaction with a null prevout");
                return Err(TransactionError::NullPrevout);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use segop_chain::{
        transaction::{Payload, Transaction},
        transparent::{Input, OutPoint, Output, Script},
    };

    use super::*;

    fn p2pkh_script() -> Script {
        // Not a real signature-checked script -- structural validation
        // never interprets scriptPubKey contents, only commitment-looking
        // OP_RETURN outputs.
        Script(vec![0x76, 0xa9, 0x14, 0x00, 0x88, 0xac])
    }

    fn spending_input() -> Input {
        Input::new(
            OutPoint {
                prev_txid: segop_chain::transaction::Txid([1u8; 32]),
                prev_index: 0,
            },
            Script(vec![0x00]),
            0xffff_ffff,
        )
    }

    fn commitment_output(data: &[u8]) -> Output {
        let blob = build_commitment_blob(data);
        let mut script = vec![OP_RETURN, blob.len() as u8];
        script.extend_from_slice(&blob);
        Output {
            value: 0,
            script_pubkey: Script(script),
        }
    }

    #[test]
    fn plain_transaction_with_no_payload_passes() {
        segop_test::init();

        let tx = Transaction::new(
            1,
            vec![spending_input()],
            vec![Output {
                value: 50_000,
                script_pubkey: p2pkh_script(),
            }],
            0,
            Payload::null(),
        );

        assert_eq!(check_structure(&tx), Ok(()));
    }

    #[test]
    fn payload_with_correct_commitment_passes() {
        segop_test::init();

        let data = vec![0x01, 0x05, b'h', b'e', b'l', b'l', b'o'];
        let tx = Transaction::new(
            1,
            vec![spending_input()],
            vec![
                Output {
                    value: 1_000,
                    script_pubkey: p2pkh_script(),
                },
                commitment_output(&data),
            ],
            0,
            Payload::present(1, data),
        );

        assert_eq!(check_structure(&tx), Ok(()));
    }

    #[test]
    fn wrong_commitment_bytes_are_rejected() {
        segop_test::init();

        let data = vec![0x01, 0x05, b'h', b'e', b'l', b'l', b'o'];
        let mut wrong_blob = [0u8; 37];
        wrong_blob[..5].copy_from_slice(b"P2SOP");
        let mut script = vec![OP_RETURN, wrong_blob.len() as u8];
        script.extend_from_slice(&wrong_blob);

        let tx = Transaction::new(
            1,
            vec![spending_input()],
            vec![Output {
                value: 0,
                script_pubkey: Script(script),
            }],
            0,
            Payload::present(1, data),
        );

        assert_eq!(check_structure(&tx), Err(TransactionError::CommitmentMismatch));
    }

    #[test]
    fn payload_without_commitment_output_is_rejected() {
        segop_test::init();

        let data = vec![0x01, 0x05, b'h', b'e', b'l', b'l', b'o'];
        let tx = Transaction::new(
            1,
            vec![spending_input()],
            vec![
                Output {
                    value: 1_000,
                    script_pubkey: p2pkh_script(),
                },
                Output {
                    value: 2_000,
                    script_pubkey: p2pkh_script(),
                },
            ],
            0,
            Payload::present(1, data),
        );

        assert_eq!(check_structure(&tx), Err(TransactionError::CommitmentMismatch));
    }

    #[test]
    fn commitment_looking_output_without_payload_is_rejected() {
        segop_test::init();

        let tx = Transaction::new(
            1,
            vec![spending_input()],
            vec![commitment_output(b"anything")],
            0,
            Payload::null(),
        );

        assert_eq!(check_structure(&tx), Err(TransactionError::UnexpectedCommitment));
    }

    #[test]
    fn duplicate_correct_commitment_outputs_are_rejected() {
        segop_test::init();

        let data = vec![0x01, 0x00];
        let tx = Transaction::new(
            1,
            vec![spending_input()],
            vec![commitment_output(&data), commitment_output(&data)],
            0,
            Payload::present(1, data),
        );

        assert_eq!(check_structure(&tx), Err(TransactionError::CommitmentMismatch));
    }

    #[test]
    fn non_canonical_tlv_is_rejected() {
        segop_test::init();

        let data = vec![0x01, 0xfd, 0x02, 0x00, b'a', b'b'];
        let tx = Transaction::new(
            1,
            vec![spending_input()],
            vec![commitment_output(&data)],
            0,
            Payload::present(1, data),
        );

        assert_eq!(check_structure(&tx), Err(TransactionError::PayloadTLV));
    }

    #[test]
    fn payload_exactly_at_size_cap_passes() {
        segop_test::init();

        let data = vec![0u8; MAX_SEGOP_PAYLOAD_SIZE];
        let tx = Transaction::new(
            1,
            vec![spending_input()],
            vec![commitment_output(&data)],
            0,
            Payload::present(1, data),
        );

        assert_eq!(check_structure(&tx), Ok(()));
    }

    #[test]
    fn payload_one_byte_over_size_cap_is_rejected() {
        segop_test::init();

        let data = vec![0u8; MAX_SEGOP_PAYLOAD_SIZE + 1];
        let tx = Transaction::new(
            1,
            vec![spending_input()],
            vec![commitment_output(&data)],
            0,
            Payload::present(1, data),
        );

        assert_eq!(check_structure(&tx), Err(TransactionError::PayloadTooLarge));
    }

    #[test]
    fn negative_output_value_is_rejected() {
        segop_test::init();

        let tx = Transaction::new(
            1,
            vec![spending_input()],
            vec![Output {
                value: -1,
                script_pubkey: p2pkh_script(),
            }],
            0,
            Payload::null(),
        );

        assert_eq!(check_structure(&tx), Err(TransactionError::NegativeOutput));
    }

    #[test]
    fn duplicate_inputs_are_rejected() {
        segop_test::init();

        let tx = Transaction::new(
            1,
            vec![spending_input(), spending_input()],
            vec![Output {
                value: 1,
                script_pubkey: p2pkh_script(),
            }],
            0,
            Payload::null(),
        );

        assert_eq!(check_structure(&tx), Err(TransactionError::DuplicateInput));
    }

    #[test]
    fn coinbase_with_short_scriptsig_is_rejected() {
        segop_test::init();

        let tx = Transaction::new(
            1,
            vec![Input::new(OutPoint::null(), Script(vec![0x00]), 0)],
            vec![Output {
                value: 1,
                script_pubkey: p2pkh_script(),
            }],
            0,
            Payload::null(),
        );

        assert_eq!(check_structure(&tx), Err(TransactionError::CoinbaseLength));
    }

    #[test]
    fn non_coinbase_null_prevout_is_rejected() {
        segop_test::init();

        let tx = Transaction::new(
            1,
            vec![
                spending_input(),
                Input::new(OutPoint::null(), Script(vec![0x00]), 0),
            ],
            vec![Output {
                value: 1,
                script_pubkey: p2pkh_script(),
            }],
            0,
            Payload::null(),
        );

        assert_eq!(check_structure(&tx), Err(TransactionError::NullPrevout));
    }
}
