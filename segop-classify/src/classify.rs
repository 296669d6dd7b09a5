//! Non-consensus tier/label classification.

use segop_chain::Transaction;

use crate::surfaces::extract_all_surfaces;

/// A coarse classification tier.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Tier {
    T0,
    T1,
    T2,
    T3,
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Tier::T0 => "T0",
            Tier::T1 => "T1",
            Tier::T2 => "T2",
            Tier::T3 => "T3",
        };
        f.write_str(s)
    }
}

/// The result of classifying one transaction.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Classification {
    pub tier: Tier,
    pub label_type: String,
    pub labels: Vec<String>,
    pub ambiguous: bool,
}

/// An `OP_RETURN` output whose pushed data is non-empty: an empty
/// `OP_RETURN` carries nothing worth classifying as data.
fn has_non_trivial_op_return(op_returns: &[Vec<u8>]) -> bool {
    op_returns.iter().any(|script| script.len() > 2)
}

/// Classify `tx` into a tier and label set.
///
/// This never affects whether `tx` is accepted; it runs only after
/// [`segop_consensus::check_structure`](../segop_consensus/fn.check_structure.html)
/// has already passed.
#[tracing::instrument(skip(tx), fields(txid = %tx.txid()))]
pub fn classify(tx: &Transaction) -> Classification {
    let surfaces = extract_all_surfaces(tx);
    let has_payload = tx.payload.is_present();
    let non_trivial_op_return = has_non_trivial_op_return(&surfaces.op_return);

    if !has_payload && !non_trivial_op_return {
        return Classification {
            tier: Tier::T1,
            label_type: "pay.standard".to_string(),
            labels: vec!["pay.standard".to_string()],
            ambiguous: false,
        };
    }

    if has_payload || non_trivial_op_return {
        let mut labels = vec!["da.embed_misc".to_string()];
        if non_trivial_op_return {
            labels.push("da.op_return_embed".to_string());
        }
        tracing::debug!(labels = ?labels, "classified as embedded metadata");
        return Classification {
            tier: Tier::T2,
            label_type: "da.embed_misc".to_string(),
            labels,
            ambiguous: false,
        };
    }

    Classification {
        tier: Tier::T3,
        label_type: "da.unknown".to_string(),
        labels: vec!["da.unknown".to_string()],
        ambiguous: false,
    }
}

#[cfg(test)]
mod tests {
    use segop_chain::{
        transaction::{Payload, Transaction},
        transparent::{Input, OutPoint, Output, Script},
    };

    use super::*;

    fn plain_tx(outputs: Vec<Output>, payload: Payload) -> Transaction {
        let input = Input::new(OutPoint::null(), Script(vec![0x01]), 0xffffffff);
        Transaction::new(1, vec![input], outputs, 0, payload)
    }

    #[test]
    fn plain_payment_with_no_payload_is_pay_standard_t1() {
        segop_test::init();

        let tx = plain_tx(
            vec![Output {
                value: 1000,
                script_pubkey: Script(vec![0x76, 0xa9]),
            }],
            Payload::null(),
        );

        let result = classify(&tx);
        assert_eq!(result.tier, Tier::T1);
        assert_eq!(result.label_type, "pay.standard");
        assert_eq!(result.labels, vec!["pay.standard".to_string()]);
    }

    #[test]
    fn payload_present_is_embed_misc_t2() {
        segop_test::init();

        let tx = plain_tx(
            vec![Output {
                value: 0,
                script_pubkey: Script(vec![0x51]),
            }],
            Payload::present(1, vec![0x01, 0x02, b'h', b'i']),
        );

        let result = classify(&tx);
        assert_eq!(result.tier, Tier::T2);
        assert_eq!(result.label_type, "da.embed_misc");
        assert_eq!(result.labels, vec!["da.embed_misc".to_string()]);
    }

    #[test]
    fn non_trivial_op_return_without_payload_is_embed_misc_with_op_return_label() {
        segop_test::init();

        let tx = plain_tx(
            vec![Output {
                value: 0,
                script_pubkey: Script(vec![0x6a, 0x04, b'd', b'a', b't', b'a']),
            }],
            Payload::null(),
        );

        let result = classify(&tx);
        assert_eq!(result.tier, Tier::T2);
        assert_eq!(
            result.labels,
            vec!["da.embed_misc".to_string(), "da.op_return_embed".to_string()]
        );
    }

    #[test]
    fn empty_op_return_does_not_count_as_non_trivial() {
        segop_test::init();

        let tx = plain_tx(
            vec![Output {
                value: 1000,
                script_pubkey: Script(vec![0x6a]),
            }],
            Payload::null(),
        );

        let result = classify(&tx);
        assert_eq!(result.tier, Tier::T1);
        assert_eq!(result.label_type, "pay.standard");
    }
}
