//! Round-robin allocation with per-tier rotation cursors
//!
//! Each tier carries a cursor naming the next directory to try. A request
//! scans directories in circular order starting at the cursor, visiting each
//! candidate exactly once; the first directory with enough space that the
//! reviewer approves wins, and the cursor is committed to one past the
//! winner. Insufficient capacity and reviewer vetoes both continue the scan
//! without committing anything, so a failed call leaves every cursor exactly
//! where it was.
//!
//! `AnyTier` requests walk tiers in ascending index order (fastest first);
//! the rotation is per tier and never borrows a cursor position across
//! tiers. `SpecificDir` requests check the one named directory and do not
//! touch the cursor at all.

use crate::allocator::{placement_at, try_specific_dir, Allocator};
use crate::location::{AllocationRequest, Placement, PlacementConstraint, Scope};
use crate::reviewer::Reviewer;
use crate::view::CapacityView;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Fair rotation across the directories of each tier.
pub struct RoundRobinAllocator {
    reviewer: Arc<dyn Reviewer>,

    /// Next directory to try, per tier. One coarse lock guards the whole
    /// scan-and-commit of a call so concurrent calls cannot race a cursor
    /// advance past each other.
    cursors: Mutex<HashMap<usize, usize>>,
}

impl RoundRobinAllocator {
    pub fn new(reviewer: Arc<dyn Reviewer>) -> Self {
        RoundRobinAllocator {
            reviewer,
            cursors: Mutex::new(HashMap::new()),
        }
    }

    /// Circular scan of one tier starting at its cursor.
    ///
    /// Commits the cursor to `(winner + 1) % dir_count` only when a winner is
    /// found. Cursor values are reduced modulo the current directory count at
    /// time of use, which clamps stale cursors after a topology reload.
    fn scan_tier(
        &self,
        cursors: &mut HashMap<usize, usize>,
        view: &dyn CapacityView,
        constraint: &PlacementConstraint,
        tier: usize,
        block_size: u64,
    ) -> Option<usize> {
        let dir_count = view.dir_count(tier);
        if dir_count == 0 {
            return None;
        }

        let start = cursors.get(&tier).copied().unwrap_or(0) % dir_count;
        for step in 0..dir_count {
            let dir = (start + step) % dir_count;
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
            cursors.insert(tier, (dir + 1) % dir_count);
            return Some(dir);
        }
        None
    }
}

impl Allocator for RoundRobinAllocator {
    fn allocate(&self, view: &dyn CapacityView, request: &AllocationRequest) -> Option<Placement> {
        let block_size = request.block_size;
        let constraint = &request.constraint;

        match constraint.scope {
            Scope::SpecificDir { tier, dir } => {
                // Direct check; the rotation cursor is not involved.
                try_specific_dir(view, &*self.reviewer, constraint, tier, dir, block_size)
            }
            Scope::AnyDirInTier(tier) => {
                if tier >= view.tier_count() {
                    warn!(tier, "allocation constraint names a missing tier");
                    return None;
                }
                let mut cursors = self.cursors.lock();
                self.scan_tier(&mut cursors, view, constraint, tier, block_size)
                    .map(|dir| placement_at(view, tier, dir))
            }
            Scope::AnyTier => {
                let mut cursors = self.cursors.lock();
                for tier in 0..view.tier_count() {
                    if let Some(dir) =
                        self.scan_tier(&mut cursors, view, constraint, tier, block_size)
                    {
                        return Some(placement_at(view, tier, dir));
                    }
                }
                None
            }
        }
    }
}
