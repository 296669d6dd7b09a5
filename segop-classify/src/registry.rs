//! The static BUDS label registry: the fixed table of known labels, each
//! naming the byte surfaces it draws from and the tier it suggests.

use std::collections::HashMap;

use lazy_static::lazy_static;

/// One entry in the label registry.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct LabelInfo {
    pub label: &'static str,
    pub description: &'static str,
    pub surfaces: &'static [&'static str],
    pub suggested_tier: &'static str,
}

/// The full set of known labels, grouped by suggested tier.
pub static REGISTRY: &[LabelInfo] = &[
    LabelInfo {
        label: "consensus.sig",
        description: "Signatures required for transaction validation.",
        surfaces: &["witness_stack", "scriptsig"],
        suggested_tier: "T0",
    },
    LabelInfo {
        label: "consensus.script",
        description: "Executed script regions that enforce spending conditions.",
        surfaces: &["scriptsig", "witness_script", "scriptpubkey"],
        suggested_tier: "T0",
    },
    LabelInfo {
        label: "consensus.taproot_prog",
        description: "Taproot or tapscript programs used in validation.",
        surfaces: &["witness_script"],
        suggested_tier: "T0",
    },
    LabelInfo {
        label: "pay.standard",
        description: "Standard payments and transfers to common scriptpubkey types.",
        surfaces: &["scriptpubkey"],
        suggested_tier: "T1",
    },
    LabelInfo {
        label: "pay.channel_open",
        description: "Lightning or L2 channel establishment outputs.",
        surfaces: &["scriptpubkey", "witness_script"],
        suggested_tier: "T1",
    },
    LabelInfo {
        label: "pay.channel_update",
        description: "Updates or closes for channel or L2 contract state.",
        surfaces: &["witness_stack", "witness_script"],
        suggested_tier: "T1",
    },
    LabelInfo {
        label: "contracts.vault",
        description: "Vault or recovery contract structures.",
        surfaces: &["scriptpubkey", "witness_script"],
        suggested_tier: "T1",
    },
    LabelInfo {
        label: "commitment.rollup_root",
        description: "Commitments anchoring L2 or rollup state to Bitcoin.",
        surfaces: &["scriptpubkey", "witness_stack", "coinbase"],
        suggested_tier: "T1",
    },
    LabelInfo {
        label: "meta.pool_tag",
        description: "Mining pool identification or metadata in coinbase.",
        surfaces: &["coinbase"],
        suggested_tier: "T1",
    },
    LabelInfo {
        label: "da.op_return_embed",
        description: "Explicit metadata embedded using OP_RETURN.",
        surfaces: &["op_return"],
        suggested_tier: "T2",
    },
    LabelInfo {
        label: "meta.inscription",
        description: "Known inscription-style payloads or formats.",
        surfaces: &["witness_stack", "op_return"],
        suggested_tier: "T2",
    },
    LabelInfo {
        label: "meta.ordinal",
        description: "Ordinal or NFT-related metadata.",
        surfaces: &["witness_stack", "op_return"],
        suggested_tier: "T2",
    },
    LabelInfo {
        label: "meta.indexer_hint",
        description: "Optional hints intended for external indexers or apps.",
        surfaces: &["op_return", "scriptpubkey", "witness_stack"],
        suggested_tier: "T2",
    },
    LabelInfo {
        label: "da.embed_misc",
        description: "General-purpose embedded metadata not covered by specific labels.",
        surfaces: &["op_return", "scriptpubkey", "witness_stack"],
        suggested_tier: "T2",
    },
    LabelInfo {
        label: "da.unknown",
        description: "Unclassified data that does not match any known pattern.",
        surfaces: &[
            "scriptsig",
            "witness_stack",
            "witness_script",
            "scriptpubkey",
            "op_return",
            "coinbase",
        ],
        suggested_tier: "T3",
    },
    LabelInfo {
        label: "da.obfuscated",
        description: "Large, opaque, or intentionally hidden data blobs.",
        surfaces: &["scriptsig", "witness_stack", "witness_script", "scriptpubkey"],
        suggested_tier: "T3",
    },
    LabelInfo {
        label: "da.unregistered_vendor",
        description: "Structured vendor-specific data for which no public label exists.",
        surfaces: &["witness_stack", "witness_script", "scriptpubkey"],
        suggested_tier: "T3",
    },
];

lazy_static! {
    static ref INDEX: HashMap<&'static str, &'static LabelInfo> =
        REGISTRY.iter().map(|entry| (entry.label, entry)).collect();
}

/// Look up a label by its exact name.
pub fn find_label(label: &str) -> Option<&'static LabelInfo> {
    INDEX.get(label).copied()
}

/// Map a suggested-tier string (`"T0"`..`"T3"`) to its raw tier byte, per
/// the same convention as [`crate::buds::decode_tier_code`].
pub fn tier_string_to_code(tier: &str) -> u8 {
    match tier {
        "T0" => 0x00,
        "T1" => 0x10,
        "T2" => 0x20,
        "T3" => 0x30,
        _ => 0xfe,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_has_no_duplicate_labels() {
        segop_test::init();

        let mut seen = std::collections::HashSet::new();
        for entry in REGISTRY {
            assert!(seen.insert(entry.label), "duplicate label {}", entry.label);
        }
        assert_eq!(REGISTRY.len(), 17);
    }

    #[test]
    fn find_label_looks_up_known_and_unknown_labels() {
        segop_test::init();

        let entry = find_label("pay.standard").expect("pay.standard is registered");
        assert_eq!(entry.suggested_tier, "T1");
        assert_eq!(entry.surfaces, &["scriptpubkey"]);

        assert!(find_label("not.a.real.label").is_none());
    }

    #[test]
    fn tier_string_to_code_matches_buds_tier_byte_convention() {
        segop_test::init();

        assert_eq!(tier_string_to_code("T0"), 0x00);
        assert_eq!(tier_string_to_code("T1"), 0x10);
        assert_eq!(tier_string_to_code("T2"), 0x20);
        assert_eq!(tier_string_to_code("T3"), 0x30);
        assert_eq!(tier_string_to_code("bogus"), 0xfe);
    }
}
