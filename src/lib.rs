//! # Tierstore - Tiered Block-Space Allocation
//!
//! `tierstore` is the capacity-allocation core of a tiered storage worker.
//! A worker owns several storage tiers (memory, SSD, HDD, ...), each holding
//! one or more directories of finite byte capacity. When the block-creation
//! path needs room for a new block, an [`Allocator`](allocator::Allocator)
//! picks one directory satisfying the request's placement constraint, or
//! reports that nothing fits:
//!
//! - **Interchangeable strategies**: round-robin (fair rotation per tier),
//!   greedy (first fit), max-free (emptiest directory first)
//! - **Pluggable reviewers** that can veto otherwise-valid candidates, e.g.
//!   to keep headroom for eviction
//! - **Exact accounting**: the allocator decides, the caller commits the
//!   reservation against the capacity view, which re-validates under its lock
//!
//! ## Quick Start
//!
//! ```rust
//! use tierstore::{
//!     allocator, AllocationRequest, Allocator, PlacementConstraint, StorageConfig,
//!     WorkerCapacityView,
//! };
//!
//! # fn main() -> tierstore::Result<()> {
//! let config = StorageConfig::from_toml_str(r#"
//!     [[tier]]
//!     [[tier.dir]]
//!     capacity_bytes = 1048576
//!     medium = "MEM"
//!
//!     [[tier]]
//!     [[tier.dir]]
//!     capacity_bytes = 16777216
//!     medium = "SSD"
//! "#)?;
//!
//! let view = WorkerCapacityView::new(&config);
//! let allocator = allocator::from_config(&config)?;
//!
//! let request = AllocationRequest::new(PlacementConstraint::any_tier(), 4096);
//! if let Some(placement) = allocator.allocate(&view, &request) {
//!     // The decision is tentative until the reservation is committed.
//!     view.reserve(placement.tier, placement.dir, request.block_size)?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Allocation failure (`None`) is an ordinary outcome: trigger eviction and
//! retry, or reject the write upstream. Out of scope here: the eviction
//! engine itself, block I/O, and cross-worker placement.

pub mod allocator;
pub mod config;
pub mod error;
pub mod location;
pub mod medium;
pub mod reviewer;
pub mod view;

pub use crate::allocator::{
    create_allocator, Allocator, GreedyAllocator, MaxFreeAllocator, RoundRobinAllocator,
};
pub use crate::config::{AllocatorConfig, DirConfig, StorageConfig, TierConfig};
pub use crate::error::{Result, TierStoreError};
pub use crate::location::{AllocationRequest, Placement, PlacementConstraint, Scope};
pub use crate::medium::{MEDIUM_HDD, MEDIUM_MEM, MEDIUM_SSD};
pub use crate::reviewer::{create_reviewer, AcceptAll, ProbabilisticReviewer, Reviewer};
pub use crate::view::{CapacityView, WorkerCapacityView};
