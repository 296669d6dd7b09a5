//! Byte-surface extraction: pulls out the raw byte blobs a label's
//! registry entry can name, grouped by where in the transaction they
//! came from.

use segop_chain::Transaction;

/// `OP_RETURN` opcode byte.
const OP_RETURN: u8 = 0x6a;

/// Raw byte surfaces collected from one transaction, keyed by origin.
///
/// `witness_script` mirrors `witness_stack` item-for-item: this crate's
/// `Transaction` model has no witness-script concept distinct from a
/// witness-stack item (there is no Taproot control-block/script-path
/// split here), so every non-empty witness-stack item is also recorded
/// as a witness-script surface.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct ExtractedSurfaces {
    pub scriptsig: Vec<Vec<u8>>,
    pub scriptpubkey: Vec<Vec<u8>>,
    pub witness_stack: Vec<Vec<u8>>,
    pub witness_script: Vec<Vec<u8>>,
    pub segop_tlv: Vec<Vec<u8>>,
    pub op_return: Vec<Vec<u8>>,
    pub coinbase: Vec<Vec<u8>>,
}

/// Extract every recognized surface from `tx`.
pub fn extract_all_surfaces(tx: &Transaction) -> ExtractedSurfaces {
    let mut out = ExtractedSurfaces::default();

    if tx.payload.is_present() && !tx.payload.data.is_empty() {
        out.segop_tlv.push(tx.payload.data.clone());
    }

    for input in &tx.inputs {
        let script = input.script_sig.as_bytes();
        if !script.is_empty() {
            out.scriptsig.push(script.to_vec());
        }
    }

    for input in &tx.inputs {
        for item in &input.witness_stack {
            if !item.is_empty() {
                out.witness_stack.push(item.clone());
                out.witness_script.push(item.clone());
            }
        }
    }

    for output in &tx.outputs {
        let script = output.script_pubkey.as_bytes();
        if script.is_empty() {
            continue;
        }
        out.scriptpubkey.push(script.to_vec());
        if script[0] == OP_RETURN {
            out.op_return.push(script.to_vec());
        }
    }

    if tx.is_coinbase() {
        let script = tx.inputs[0].script_sig.as_bytes();
        if !script.is_empty() {
            out.coinbase.push(script.to_vec());
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use segop_chain::{
        transaction::{Payload, Transaction},
        transparent::{Input, OutPoint, Output, Script},
    };

    use super::*;

    #[test]
    fn segop_tlv_surface_present_only_when_payload_present() {
        segop_test::init();

        let input = Input::new(OutPoint::null(), Script(vec![0xab, 0xcd]), 0);
        let output = Output {
            value: 0,
            script_pubkey: Script(vec![0x51]),
        };

        let without_payload =
            Transaction::new(1, vec![input.clone()], vec![output.clone()], 0, Payload::null());
        assert!(extract_all_surfaces(&without_payload).segop_tlv.is_empty());

        let data = vec![0x01, 0x02, b'h', b'i'];
        let with_payload = Transaction::new(1, vec![input], vec![output], 0, Payload::present(1, data.clone()));
        assert_eq!(extract_all_surfaces(&with_payload).segop_tlv, vec![data]);
    }

    #[test]
    fn op_return_outputs_are_a_subset_of_scriptpubkey() {
        segop_test::init();

        let input = Input::new(OutPoint::null(), Script(vec![0xab]), 0);
        let op_return_script = Script(vec![0x6a, 0x02, b'h', b'i']);
        let plain_script = Script(vec![0x76, 0xa9]);

        let tx = Transaction::new(
            1,
            vec![input],
            vec![
                Output {
                    value: 0,
                    script_pubkey: op_return_script.clone(),
                },
                Output {
                    value: 1,
                    script_pubkey: plain_script,
                },
            ],
            0,
            Payload::null(),
        );

        let surfaces = extract_all_surfaces(&tx);
        assert_eq!(surfaces.scriptpubkey.len(), 2);
        assert_eq!(surfaces.op_return, vec![op_return_script.as_bytes().to_vec()]);
    }

    #[test]
    fn coinbase_surface_only_populated_for_coinbase_input() {
        segop_test::init();

        let coinbase_input = Input::new(OutPoint::null(), Script(vec![0x01, 0x02]), 0);
        let output = Output {
            value: 1,
            script_pubkey: Script(vec![0x51]),
        };
        let tx = Transaction::new(1, vec![coinbase_input], vec![output], 0, Payload::null());

        let surfaces = extract_all_surfaces(&tx);
        assert_eq!(surfaces.coinbase, vec![vec![0x01, 0x02]]);
    }
}
