//! Greedy allocation: first directory with room, in enumeration order
//!
//! Walks tiers ascending and directories in their natural order, returning
//! the first candidate that matches the medium filter, has enough space, and
//! survives review. Cheapest strategy, but it piles allocations onto early
//! directories; use round-robin when balance matters.

use crate::allocator::{placement_at, try_specific_dir, Allocator};
use crate::location::{AllocationRequest, Placement, PlacementConstraint, Scope};
use crate::reviewer::Reviewer;
use crate::view::CapacityView;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct GreedyAllocator {
    reviewer: Arc<dyn Reviewer>,
}

impl GreedyAllocator {
    pub fn new(reviewer: Arc<dyn Reviewer>) -> Self {
        GreedyAllocator { reviewer }
    }

    fn first_fit_in_tier(
        &self,
        view: &dyn CapacityView,
        constraint: &PlacementConstraint,
        tier: usize,
        block_size: u64,
    ) -> Option<usize> {
        for dir in 0..view.dir_count(tier) {
            if !constraint.medium_matches(view.medium_of(tier, dir)) {
                continue;
            }
            if view.available_bytes(tier, dir) < block_size {
                continue;
            }
            if !self.reviewer.accept(view, tier, dir, block_size) {
                debug!(tier, dir, block_size, "reviewer vetoed candidate");
                continue;
            }
            return Some(dir);
        }
        None
    }
}

impl Allocator for GreedyAllocator {
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
                self.first_fit_in_tier(view, constraint, tier, block_size)
                    .map(|dir| placement_at(view, tier, dir))
            }
            Scope::AnyTier => {
                for tier in 0..view.tier_count() {
                    if let Some(dir) = self.first_fit_in_tier(view, constraint, tier, block_size) {
                        return Some(placement_at(view, tier, dir));
                    }
                }
                None
            }
        }
    }
}
