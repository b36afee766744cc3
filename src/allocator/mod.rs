//! Block-space allocation strategies
//!
//! Every strategy implements the same contract: given a capacity view and a
//! request, pick one directory or report failure. Failure is an ordinary
//! outcome (capacity shortfall, reviewer veto, or a constraint naming a
//! directory that does not exist), so `allocate` returns an `Option` rather
//! than an error.
//!
//! Strategies:
//! - [`round_robin`]: per-tier rotation cursors for fair distribution
//! - [`greedy`]: first directory with enough space, tier order
//! - [`max_free`]: per tier, the directory with the most free bytes

pub mod greedy;
pub mod max_free;
pub mod round_robin;

use crate::config::StorageConfig;
use crate::error::{Result, TierStoreError};
use crate::location::{AllocationRequest, Placement, PlacementConstraint};
use crate::reviewer::{create_reviewer, Reviewer};
use crate::view::CapacityView;
use std::sync::Arc;

pub use greedy::GreedyAllocator;
pub use max_free::MaxFreeAllocator;
pub use round_robin::RoundRobinAllocator;

/// A block-space allocation strategy.
///
/// Implementations must be safe to call from many threads at once: a single
/// `allocate` call is atomic with respect to any internal strategy state
/// (e.g. rotation cursors). Capacity accounting is not the strategy's job —
/// on success the caller commits the reservation against the winning
/// directory and re-validates capacity there.
pub trait Allocator: Send + Sync {
    /// Pick a directory for the request, or `None` when no directory
    /// satisfying the constraint has room (or every candidate was vetoed).
    fn allocate(&self, view: &dyn CapacityView, request: &AllocationRequest) -> Option<Placement>;
}

impl std::fmt::Debug for dyn Allocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn Allocator")
    }
}

/// Build the strategy named in the config, wired to the given reviewer.
pub fn create_allocator(strategy: &str, reviewer: Arc<dyn Reviewer>) -> Result<Box<dyn Allocator>> {
    match strategy {
        "round-robin" => Ok(Box::new(RoundRobinAllocator::new(reviewer))),
        "greedy" => Ok(Box::new(GreedyAllocator::new(reviewer))),
        "max-free" => Ok(Box::new(MaxFreeAllocator::new(reviewer))),
        other => Err(TierStoreError::UnknownStrategy(other.to_string())),
    }
}

/// Build both the reviewer and the strategy selected by the config.
pub fn from_config(config: &StorageConfig) -> Result<Box<dyn Allocator>> {
    let reviewer = create_reviewer(config)?;
    create_allocator(&config.allocator.strategy, reviewer)
}

/// Check one specific directory against a constraint.
///
/// Shared by all strategies for `SpecificDir` requests: bounds, medium
/// filter, capacity, then the reviewer — in that order, so a veto never
/// masks a genuine shortage.
pub(crate) fn try_specific_dir(
    view: &dyn CapacityView,
    reviewer: &dyn Reviewer,
    constraint: &PlacementConstraint,
    tier: usize,
    dir: usize,
    block_size: u64,
) -> Option<Placement> {
    if tier >= view.tier_count() || dir >= view.dir_count(tier) {
        tracing::warn!(tier, dir, "allocation constraint names a missing directory");
        return None;
    }
    if !constraint.medium_matches(view.medium_of(tier, dir)) {
        return None;
    }
    if view.available_bytes(tier, dir) < block_size {
        return None;
    }
    if !reviewer.accept(view, tier, dir, block_size) {
        tracing::debug!(tier, dir, block_size, "reviewer vetoed candidate");
        return None;
    }
    Some(placement_at(view, tier, dir))
}

pub(crate) fn placement_at(view: &dyn CapacityView, tier: usize, dir: usize) -> Placement {
    Placement {
        tier,
        dir,
        medium: view.medium_of(tier, dir).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::medium::MEDIUM_MEM;
    use crate::reviewer::AcceptAll;

    #[test]
    fn test_factory_known_strategies() {
        for name in ["round-robin", "greedy", "max-free"] {
            assert!(create_allocator(name, Arc::new(AcceptAll)).is_ok());
        }
    }

    #[test]
    fn test_factory_unknown_strategy() {
        let err = create_allocator("best-fit", Arc::new(AcceptAll)).unwrap_err();
        assert!(matches!(err, TierStoreError::UnknownStrategy(name) if name == "best-fit"));
    }

    #[test]
    fn test_from_config() {
        let mut config = StorageConfig::from_topology(&[&[(1000, MEDIUM_MEM)]]);
        assert!(from_config(&config).is_ok());

        config.allocator.strategy = "no-such-strategy".to_string();
        assert!(matches!(
            from_config(&config),
            Err(TierStoreError::UnknownStrategy(_))
        ));
    }
}
