//! BUDS tier/type codes and the ARBDA transaction-level scoring rule.
//!
//! Tiers and data types are carried as raw bytes on the wire (inside a
//! label's registry entry or an out-of-band hint); this module only
//! supplies the decode tables and the single scoring rule that folds a
//! set of per-surface tiers into one transaction-level tier.

/// A structured tier, decoded from a raw tier byte.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum BudsTier {
    /// Pure monetary / consensus data.
    T0Monetary,
    /// Planned / structured metadata.
    T1Metadata,
    /// L2 infrastructure, anchors, proofs.
    T2Operational,
    /// Arbitrary / opaque / application blobs.
    T3Arbitrary,
    /// No recognizable tier byte.
    Unspecified,
    /// More than one tier applies and none dominates.
    Ambiguous,
}

impl BudsTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudsTier::T0Monetary => "T0_MONETARY",
            BudsTier::T1Metadata => "T1_METADATA",
            BudsTier::T2Operational => "T2_OPERATIONAL",
            BudsTier::T3Arbitrary => "T3_ARBITRARY",
            BudsTier::Unspecified => "UNSPECIFIED",
            BudsTier::Ambiguous => "AMBIGUOUS",
        }
    }
}

impl std::fmt::Display for BudsTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decode a raw tier byte into a [`BudsTier`].
pub fn decode_tier_code(raw_code: u8) -> BudsTier {
    match raw_code {
        0x00 => BudsTier::T0Monetary,
        0x10 => BudsTier::T1Metadata,
        0x20 => BudsTier::T2Operational,
        0x30 => BudsTier::T3Arbitrary,
        _ => BudsTier::Unspecified,
    }
}

/// A data-type code, scoped to the tier it was decoded under: the same
/// raw byte means different things in different tiers.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum BudsDataType {
    Unspecified,

    TextNote,
    JsonMetadata,
    Receipt,
    Invoice,

    L2StateAnchor,
    RollupBatchRef,
    ProofRef,
    VaultMetadata,
    PegRef,

    ArbitraryNamespace,

    Unknown,
}

impl BudsDataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudsDataType::Unspecified => "UNSPECIFIED",
            BudsDataType::TextNote => "TEXT_NOTE",
            BudsDataType::JsonMetadata => "JSON_METADATA",
            BudsDataType::Receipt => "RECEIPT",
            BudsDataType::Invoice => "INVOICE",
            BudsDataType::L2StateAnchor => "L2_STATE_ANCHOR",
            BudsDataType::RollupBatchRef => "ROLLUP_BATCH_REF",
            BudsDataType::ProofRef => "PROOF_REF",
            BudsDataType::VaultMetadata => "VAULT_METADATA",
            BudsDataType::PegRef => "PEG_REF",
            BudsDataType::ArbitraryNamespace => "ARBITRARY_NAMESPACE",
            BudsDataType::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for BudsDataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decode a raw data-type byte, scoped to `tier`.
pub fn decode_data_type_code(tier: BudsTier, raw_code: u8) -> BudsDataType {
    match tier {
        BudsTier::T1Metadata => match raw_code {
            0x01 => BudsDataType::TextNote,
            0x02 => BudsDataType::JsonMetadata,
            0x03 => BudsDataType::Receipt,
            0x04 => BudsDataType::Invoice,
            _ => BudsDataType::Unknown,
        },
        BudsTier::T2Operational => match raw_code {
            0x01 => BudsDataType::L2StateAnchor,
            0x02 => BudsDataType::RollupBatchRef,
            0x03 => BudsDataType::ProofRef,
            0x04 => BudsDataType::VaultMetadata,
            0x05 => BudsDataType::PegRef,
            _ => BudsDataType::Unknown,
        },
        BudsTier::T3Arbitrary => {
            if raw_code >= 0x80 {
                BudsDataType::ArbitraryNamespace
            } else {
                BudsDataType::Unknown
            }
        }
        BudsTier::T0Monetary | BudsTier::Unspecified | BudsTier::Ambiguous => {
            BudsDataType::Unspecified
        }
    }
}

/// A transaction-level risk tier, per the ARBDA scoring rule.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum ArbdaTier {
    T0,
    T1,
    T2,
    T3,
}

impl std::fmt::Display for ArbdaTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ArbdaTier::T0 => "T0",
            ArbdaTier::T1 => "T1",
            ArbdaTier::T2 => "T2",
            ArbdaTier::T3 => "T3",
        };
        f.write_str(s)
    }
}

/// Which tiers were observed among a transaction's labeled surfaces.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct TierPresence {
    pub has_t0: bool,
    pub has_t1: bool,
    pub has_t2: bool,
    pub has_t3: bool,
}

/// Fold a [`TierPresence`] into one transaction-level tier: highest tier
/// present wins.
pub fn compute_arbda_tier(presence: TierPresence) -> ArbdaTier {
    if presence.has_t3 {
        ArbdaTier::T3
    } else if presence.has_t2 {
        ArbdaTier::T2
    } else if presence.has_t1 {
        ArbdaTier::T1
    } else {
        ArbdaTier::T0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_codes_decode_to_expected_variants() {
        segop_test::init();

        assert_eq!(decode_tier_code(0x00), BudsTier::T0Monetary);
        assert_eq!(decode_tier_code(0x10), BudsTier::T1Metadata);
        assert_eq!(decode_tier_code(0x20), BudsTier::T2Operational);
        assert_eq!(decode_tier_code(0x30), BudsTier::T3Arbitrary);
        assert_eq!(decode_tier_code(0x99), BudsTier::Unspecified);
    }

    #[test]
    fn data_type_codes_are_tier_scoped() {
        segop_test::init();

        assert_eq!(
            decode_data_type_code(BudsTier::T1Metadata, 0x01),
            BudsDataType::TextNote
        );
        assert_eq!(
            decode_data_type_code(BudsTier::T2Operational, 0x01),
            BudsDataType::L2StateAnchor
        );
        assert_eq!(
            decode_data_type_code(BudsTier::T3Arbitrary, 0x80),
            BudsDataType::ArbitraryNamespace
        );
        assert_eq!(
            decode_data_type_code(BudsTier::T3Arbitrary, 0x01),
            BudsDataType::Unknown
        );
        assert_eq!(
            decode_data_type_code(BudsTier::T0Monetary, 0x01),
            BudsDataType::Unspecified
        );
    }

    #[test]
    fn arbda_tier_takes_the_highest_present_tier() {
        segop_test::init();

        assert_eq!(compute_arbda_tier(TierPresence::default()), ArbdaTier::T0);
        assert_eq!(
            compute_arbda_tier(TierPresence {
                has_t1: true,
                ..Default::default()
            }),
            ArbdaTier::T1
        );
        assert_eq!(
            compute_arbda_tier(TierPresence {
                has_t1: true,
                has_t2: true,
                ..Default::default()
            }),
            ArbdaTier::T2
        );
        assert_eq!(
            compute_arbda_tier(TierPresence {
                has_t1: true,
                has_t2: true,
                has_t3: true,
            }),
            ArbdaTier::T3
        );
    }
}
