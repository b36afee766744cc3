//! Placement constraints and allocation requests
//!
//! A [`PlacementConstraint`] scopes where a block may land: anywhere, any
//! directory within one tier, or one specific directory, optionally narrowed
//! to a medium label. Constraints are immutable and single-use; the allocator
//! resolves them against the capacity view at call time.

use serde::{Deserialize, Serialize};

/// Scope of a placement constraint.
///
/// Tiers are numbered ascending from fastest (tier 0) to slowest; `AnyTier`
/// requests are resolved in that order, which is what encodes the
/// "prefer faster tiers" policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scope {
    /// Any directory in any tier.
    AnyTier,
    /// Any directory within the given tier.
    AnyDirInTier(usize),
    /// Exactly one directory.
    SpecificDir { tier: usize, dir: usize },
}

/// Caller-specified scope for where a block may be allocated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementConstraint {
    pub scope: Scope,
    /// Only directories whose medium label matches are eligible.
    pub medium: Option<String>,
}

impl PlacementConstraint {
    /// Any directory in any tier is acceptable.
    pub fn any_tier() -> Self {
        PlacementConstraint {
            scope: Scope::AnyTier,
            medium: None,
        }
    }

    /// Any directory within `tier` is acceptable.
    pub fn any_dir_in_tier(tier: usize) -> Self {
        PlacementConstraint {
            scope: Scope::AnyDirInTier(tier),
            medium: None,
        }
    }

    /// Exactly the directory `(tier, dir)` is acceptable.
    pub fn specific_dir(tier: usize, dir: usize) -> Self {
        PlacementConstraint {
            scope: Scope::SpecificDir { tier, dir },
            medium: None,
        }
    }

    /// Narrow the constraint to directories with the given medium label.
    pub fn with_medium(mut self, medium: impl Into<String>) -> Self {
        self.medium = Some(medium.into());
        self
    }

    /// Whether a directory with the given medium label passes the filter.
    pub fn medium_matches(&self, medium: &str) -> bool {
        match &self.medium {
            Some(wanted) => wanted == medium,
            None => true,
        }
    }
}

/// A single-use request for block space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationRequest {
    pub constraint: PlacementConstraint,
    /// Requested size in bytes.
    pub block_size: u64,
}

impl AllocationRequest {
    pub fn new(constraint: PlacementConstraint, block_size: u64) -> Self {
        AllocationRequest {
            constraint,
            block_size,
        }
    }
}

/// A successful placement decision.
///
/// Identifies the winning directory; committing the reservation against it is
/// the caller's job (see [`crate::view::WorkerCapacityView::reserve`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub tier: usize,
    pub dir: usize,
    pub medium: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::medium::{MEDIUM_MEM, MEDIUM_SSD};

    #[test]
    fn test_constructors() {
        assert_eq!(PlacementConstraint::any_tier().scope, Scope::AnyTier);
        assert_eq!(
            PlacementConstraint::any_dir_in_tier(2).scope,
            Scope::AnyDirInTier(2)
        );
        assert_eq!(
            PlacementConstraint::specific_dir(1, 3).scope,
            Scope::SpecificDir { tier: 1, dir: 3 }
        );
    }

    #[test]
    fn test_medium_filter() {
        let unfiltered = PlacementConstraint::any_tier();
        assert!(unfiltered.medium_matches(MEDIUM_MEM));
        assert!(unfiltered.medium_matches("NVME"));

        let ssd_only = PlacementConstraint::any_tier().with_medium(MEDIUM_SSD);
        assert!(ssd_only.medium_matches(MEDIUM_SSD));
        assert!(!ssd_only.medium_matches(MEDIUM_MEM));
    }
}
