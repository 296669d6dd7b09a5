//! View-layer segOP retention policy: a non-consensus configuration
//! record plus the `is_pruned` predicate that RPC/REST/UI layers use to
//! decide whether to expose full payload bytes for an old block.
//!
//! Nothing here touches disk layout or admission: a "pruned" height is
//! simply one this layer will decline to serve full payload data for.
//! The active policy is published behind an [`arc_swap::ArcSwap`] so a
//! running node can reload it (e.g. on an RPC config change) without any
//! reader taking a lock.

use std::sync::Arc;

use arc_swap::ArcSwap;

/// The non-consensus segOP retention policy, in blocks.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct RetentionPolicy {
    pub enabled: bool,

    /// Depth for which payloads must be retained for admission-time
    /// re-validation.
    pub validation_window: i32,
    /// Optional extended window for fast historical queries.
    pub archive_window: i32,
    /// Local retention extension beyond the archive window.
    pub operator_window: i32,
}

impl RetentionPolicy {
    pub const DEFAULT_VALIDATION_WINDOW: i32 = 144;
    pub const MIN_VALIDATION_WINDOW: i32 = 6;
    pub const MAX_VALIDATION_WINDOW: i32 = 2016;

    pub const DEFAULT_ARCHIVE_WINDOW: i32 = 2016;
    pub const MIN_ARCHIVE_WINDOW: i32 = 144;
    pub const MAX_ARCHIVE_WINDOW: i32 = 65535;

    pub const DEFAULT_OPERATOR_WINDOW: i32 = 8064;
    pub const MIN_OPERATOR_WINDOW: i32 = 0;
    pub const MAX_OPERATOR_WINDOW: i32 = 262800;

    /// Disabled policy: nothing is ever reported as pruned.
    pub fn disabled() -> Self {
        RetentionPolicy {
            enabled: false,
            validation_window: 0,
            archive_window: 0,
            operator_window: 0,
        }
    }

    /// The recommended default policy, enabled with the documented
    /// default windows.
    pub fn recommended_defaults() -> Self {
        RetentionPolicy {
            enabled: true,
            validation_window: Self::DEFAULT_VALIDATION_WINDOW,
            archive_window: Self::DEFAULT_ARCHIVE_WINDOW,
            operator_window: Self::DEFAULT_OPERATOR_WINDOW,
        }
    }

    /// Whether `block_height` should be treated as pruned given a chain
    /// tip at `tip_height`.
    pub fn is_pruned(&self, tip_height: i32, block_height: i32) -> bool {
        if !self.enabled {
            return false;
        }
        if tip_height < 0 || block_height < 0 {
            return false;
        }

        let depth = tip_height - block_height;
        if depth < 0 {
            return false;
        }

        let effective = self.validation_window.max(self.operator_window);
        if effective <= 0 {
            return false;
        }

        depth >= effective
    }
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        RetentionPolicy::disabled()
    }
}

/// A handle to the live, atomically-swappable retention policy.
///
/// Cloning a [`PolicyHandle`] is cheap: it shares the same underlying
/// [`ArcSwap`], so every clone observes the same published policy.
#[derive(Clone)]
pub struct PolicyHandle {
    inner: Arc<ArcSwap<RetentionPolicy>>,
}

impl PolicyHandle {
    pub fn new(initial: RetentionPolicy) -> Self {
        PolicyHandle {
            inner: Arc::new(ArcSwap::from_pointee(initial)),
        }
    }

    /// The currently published policy.
    pub fn current(&self) -> RetentionPolicy {
        **self.inner.load()
    }

    /// Publish a new policy. Readers that already hold a value from
    /// [`PolicyHandle::current`] keep seeing the old one; only the next
    /// call to `current` observes the update.
    #[tracing::instrument(skip(self))]
    pub fn publish(&self, policy: RetentionPolicy) {
        tracing::debug!(?policy, "publishing segop retention policy");
        self.inner.store(Arc::new(policy));
    }

    /// Whether `block_height` is pruned under the currently published
    /// policy.
    pub fn is_pruned(&self, tip_height: i32, block_height: i32) -> bool {
        self.current().is_pruned(tip_height, block_height)
    }
}

impl Default for PolicyHandle {
    fn default() -> Self {
        PolicyHandle::new(RetentionPolicy::default())
    }
}
