//! Max-free allocation: the emptiest directory per tier
//!
//! Walks tiers ascending; within each tier the single candidate is the
//! medium-matching directory with the most available bytes. If that
//! candidate cannot hold the request or is vetoed, the whole tier is skipped
//! rather than trying its other directories — the emptiest one was the best
//! this tier had to offer.

use crate::allocator::{placement_at, try_specific_dir, Allocator};
use crate::location::{AllocationRequest, Placement, PlacementConstraint, Scope};
use crate::reviewer::Reviewer;
use crate::view::CapacityView;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct MaxFreeAllocator {
    reviewer: Arc<dyn Reviewer>,
}

impl MaxFreeAllocator {
    pub fn new(reviewer: Arc<dyn Reviewer>) -> Self {
        MaxFreeAllocator { reviewer }
    }

    fn emptiest_in_tier(
        &self,
        view: &dyn CapacityView,
        constraint: &PlacementConstraint,
        tier: usize,
        block_size: u64,
    ) -> Option<usize> {
        let candidate = (0..view.dir_count(tier))
            .filter(|&dir| constraint.medium_matches(view.medium_of(tier, dir)))
            .max_by_key(|&dir| view.available_bytes(tier, dir))?;

        if view.available_bytes(tier, candidate) < block_size {
            return None;
        }
        if !self.reviewer.accept(view, tier, candidate, block_size) {
            debug!(tier, candidate, block_size, "reviewer vetoed candidate");
            return None;
        }
        Some(candidate)
    }
}

impl Allocator for MaxFreeAllocator {
    fn allocate(&self, view: &dyn CapacityView, request: &AllocationRequest) -> Option<Placement> {
        let block_size = request.block_size;
        let constraint = &request.constraint;

        match constraint.scope {
            Scope::SpecificDir { tier, dir } => {
                try_specific_dir(view, &*self.reviewer, constraint, tier, dir, block_size)
            }
            Scope::AnyDirInTier(tier) => {
                if tier >= view.tier_count() {
                    warn!(tier, "allocation constraint names a missing tier");
                    return None;
                }
                self.emptiest_in_tier(view, constraint, tier, block_size)
                    .map(|dir| placement_at(view, tier, dir))
            }
            Scope::AnyTier => {
                for tier in 0..view.tier_count() {
                    if let Some(dir) = self.emptiest_in_tier(view, constraint, tier, block_size) {
                        return Some(placement_at(view, tier, dir));
                    }
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageConfig;
    use crate::medium::{MEDIUM_HDD, MEDIUM_SSD};
    use crate::reviewer::AcceptAll;
    use crate::view::WorkerCapacityView;

    #[test]
    fn test_picks_emptiest_directory() {
        let config = StorageConfig::from_topology(&[&[
            (1000, MEDIUM_SSD),
            (3000, MEDIUM_SSD),
            (2000, MEDIUM_SSD),
        ]]);
        let view = WorkerCapacityView::new(&config);
        view.reserve(0, 1, 2500).unwrap(); // dir 1 now has 500 free

        let alloc = MaxFreeAllocator::new(Arc::new(AcceptAll));
        let p = alloc
            .allocate(
                &view,
                &AllocationRequest::new(PlacementConstraint::any_dir_in_tier(0), 100),
            )
            .unwrap();
        assert_eq!(p.dir, 2);
    }

    #[test]
    fn test_any_tier_falls_through_when_candidate_too_small() {
        let config = StorageConfig::from_topology(&[
            &[(500, MEDIUM_SSD), (400, MEDIUM_SSD)],
            &[(5000, MEDIUM_HDD)],
        ]);
        let view = WorkerCapacityView::new(&config);

        let alloc = MaxFreeAllocator::new(Arc::new(AcceptAll));
        let p = alloc
            .allocate(
                &view,
                &AllocationRequest::new(PlacementConstraint::any_tier(), 1000),
            )
            .unwrap();
        assert_eq!((p.tier, p.dir), (1, 0));
    }

    #[test]
    fn test_empty_medium_match_is_none() {
        let config = StorageConfig::from_topology(&[&[(1000, MEDIUM_SSD)]]);
        let view = WorkerCapacityView::new(&config);

        let alloc = MaxFreeAllocator::new(Arc::new(AcceptAll));
        assert!(alloc
            .allocate(
                &view,
                &AllocationRequest::new(
                    PlacementConstraint::any_tier().with_medium(MEDIUM_HDD),
                    1,
                ),
            )
            .is_none());
    }
}
