//! Cross-strategy allocation behavior
//!
//! Every strategy honors the same constraint semantics: `SpecificDir` only
//! ever returns the named directory, medium filters never leak other media,
//! and shortfall is a quiet failure. These run against all three strategies.

use std::sync::Arc;
use tierstore::{
    create_allocator, AcceptAll, AllocationRequest, Allocator, PlacementConstraint, StorageConfig,
    WorkerCapacityView, MEDIUM_HDD, MEDIUM_MEM, MEDIUM_SSD,
};

const STRATEGIES: [&str; 3] = ["round-robin", "greedy", "max-free"];

fn make(strategy: &str) -> Box<dyn Allocator> {
    create_allocator(strategy, Arc::new(AcceptAll)).unwrap()
}

fn three_tier_view() -> WorkerCapacityView {
    let config = StorageConfig::from_topology(&[
        &[(1000, MEDIUM_MEM)],
        &[(2000, MEDIUM_SSD), (2000, MEDIUM_SSD)],
        &[(3000, MEDIUM_HDD), (3000, MEDIUM_HDD), (3000, MEDIUM_HDD)],
    ]);
    WorkerCapacityView::new(&config)
}

#[test]
fn any_dir_in_tier_stays_in_tier() {
    for strategy in STRATEGIES {
        let view = three_tier_view();
        let alloc = make(strategy);

        for tier in 0..3 {
            let p = alloc
                .allocate(
                    &view,
                    &AllocationRequest::new(PlacementConstraint::any_dir_in_tier(tier), 500),
                )
                .unwrap_or_else(|| panic!("{}: tier {} should fit 500 bytes", strategy, tier));
            assert_eq!(p.tier, tier, "{}: placement escaped the tier", strategy);
        }

        // Larger than any single directory in the tier.
        assert!(
            alloc
                .allocate(
                    &view,
                    &AllocationRequest::new(PlacementConstraint::any_dir_in_tier(0), 1500),
                )
                .is_none(),
            "{}: oversized request must fail",
            strategy
        );
    }
}

#[test]
fn specific_dir_returns_only_that_dir() {
    for strategy in STRATEGIES {
        let view = three_tier_view();
        let alloc = make(strategy);

        let p = alloc
            .allocate(
                &view,
                &AllocationRequest::new(PlacementConstraint::specific_dir(2, 1), 2500),
            )
            .unwrap();
        assert_eq!((p.tier, p.dir), (2, 1), "{}: wrong directory", strategy);
        view.reserve(2, 1, 2500).unwrap();

        // 500 bytes left in (2, 1): too small now, and other dirs with room
        // must never be substituted.
        assert!(
            alloc
                .allocate(
                    &view,
                    &AllocationRequest::new(PlacementConstraint::specific_dir(2, 1), 600),
                )
                .is_none(),
            "{}: specific-dir must not fall back elsewhere",
            strategy
        );
    }
}

#[test]
fn specific_dir_out_of_range_is_quiet_failure() {
    for strategy in STRATEGIES {
        let view = three_tier_view();
        let alloc = make(strategy);

        for (tier, dir) in [(3, 0), (0, 1), (9, 9)] {
            assert!(
                alloc
                    .allocate(
                        &view,
                        &AllocationRequest::new(PlacementConstraint::specific_dir(tier, dir), 1),
                    )
                    .is_none(),
                "{}: missing ({}, {}) must fail quietly",
                strategy,
                tier,
                dir
            );
        }
    }
}

#[test]
fn medium_filter_selects_matching_tier() {
    for strategy in STRATEGIES {
        let view = three_tier_view();
        let alloc = make(strategy);

        // HDD lives only in tier 2; a small request must still land there.
        let p = alloc
            .allocate(
                &view,
                &AllocationRequest::new(
                    PlacementConstraint::any_tier().with_medium(MEDIUM_HDD),
                    100,
                ),
            )
            .unwrap();
        assert_eq!(p.tier, 2, "{}: HDD filter leaked", strategy);
        assert_eq!(p.medium, MEDIUM_HDD);

        // A medium nobody configured matches no directory.
        assert!(
            alloc
                .allocate(
                    &view,
                    &AllocationRequest::new(
                        PlacementConstraint::any_tier().with_medium("NVME"),
                        100,
                    ),
                )
                .is_none(),
            "{}: unconfigured medium must fail",
            strategy
        );
    }
}

#[test]
fn no_false_success_at_exact_capacity_boundary() {
    for strategy in STRATEGIES {
        let view = three_tier_view();
        let alloc = make(strategy);

        // Exactly the full directory fits...
        let p = alloc
            .allocate(
                &view,
                &AllocationRequest::new(PlacementConstraint::specific_dir(0, 0), 1000),
            )
            .unwrap();
        view.reserve(p.tier, p.dir, 1000).unwrap();

        // ...and one byte more never does.
        assert!(
            alloc
                .allocate(
                    &view,
                    &AllocationRequest::new(PlacementConstraint::specific_dir(0, 0), 1),
                )
                .is_none(),
            "{}: drained directory must not be offered",
            strategy
        );
    }
}
