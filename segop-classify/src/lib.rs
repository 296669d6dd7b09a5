//! Non-consensus transaction classification: tags an already-validated
//! transaction into a tier/label record for policy and telemetry
//! purposes. Nothing in this crate affects whether a transaction is
//! accepted -- that decision belongs entirely to `segop-consensus`.

pub mod buds;
pub mod classify;
pub mod registry;
pub mod surfaces;

pub use classify::{classify, Classification, Tier};
pub use registry::{find_label, LabelInfo, REGISTRY};
pub use surfaces::{extract_all_surfaces, ExtractedSurfaces};
