//! Capacity view: the read-only query surface allocators decide against
//!
//! The [`CapacityView`] trait is what allocation strategies and reviewers
//! consult. It carries no staleness guarantee beyond "accurate as of this
//! call" — strategies re-query on every attempt instead of caching. When an
//! eviction plan is in flight, the component supplying the view is expected
//! to report post-eviction availability.
//!
//! [`WorkerCapacityView`] is the concrete in-memory implementation backing a
//! worker: topology and capacities are fixed at construction from
//! [`StorageConfig`]; available bytes move only through [`reserve`] and
//! [`release`], the commit surface used by the block-creation path and the
//! eviction engine respectively.
//!
//! [`reserve`]: WorkerCapacityView::reserve
//! [`release`]: WorkerCapacityView::release

use crate::config::StorageConfig;
use crate::error::{Result, TierStoreError};
use parking_lot::RwLock;
use tracing::debug;

/// Read-only view of the tier/directory topology and its capacity.
///
/// Indices are dense: tiers are `0..tier_count()`, directories within a tier
/// are `0..dir_count(tier)`. Callers must only pass in-range indices to the
/// per-directory accessors.
pub trait CapacityView: Send + Sync {
    /// Number of tiers, fastest first.
    fn tier_count(&self) -> usize;

    /// Number of directories in a tier, in their natural order.
    fn dir_count(&self, tier: usize) -> usize;

    /// Total capacity of a directory in bytes.
    fn capacity_bytes(&self, tier: usize, dir: usize) -> u64;

    /// Bytes currently available in a directory.
    fn available_bytes(&self, tier: usize, dir: usize) -> u64;

    /// Medium label of a directory.
    fn medium_of(&self, tier: usize, dir: usize) -> &str;
}

/// In-memory capacity bookkeeping for one worker.
///
/// Topology (tier/dir layout, capacities, medium labels) is immutable after
/// construction; only the available-byte counters are behind a lock. The
/// reserve path re-validates capacity under the write lock, so a race between
/// "allocator picks directory" and "caller reserves space" surfaces as
/// [`TierStoreError::ReservationConflict`] instead of overcommitment — the
/// caller's remedy is to re-run allocation.
pub struct WorkerCapacityView {
    mediums: Vec<Vec<String>>,
    capacities: Vec<Vec<u64>>,
    available: RwLock<Vec<Vec<u64>>>,
}

impl WorkerCapacityView {
    /// Build a view from a validated config, all directories empty.
    pub fn new(config: &StorageConfig) -> Self {
        let mediums = config
            .tiers
            .iter()
            .map(|t| t.dirs.iter().map(|d| d.medium.clone()).collect())
            .collect();
        let capacities: Vec<Vec<u64>> = config
            .tiers
            .iter()
            .map(|t| t.dirs.iter().map(|d| d.capacity_bytes).collect())
            .collect();
        let available = RwLock::new(capacities.clone());

        WorkerCapacityView {
            mediums,
            capacities,
            available,
        }
    }

    /// Commit a reservation against a directory.
    ///
    /// Re-validates availability under the write lock; a concurrent caller
    /// that got the same placement decision first wins, and the loser gets
    /// [`TierStoreError::ReservationConflict`].
    pub fn reserve(&self, tier: usize, dir: usize, bytes: u64) -> Result<()> {
        self.check_indices(tier, dir)?;

        let mut available = self.available.write();
        let slot = &mut available[tier][dir];
        if *slot < bytes {
            return Err(TierStoreError::ReservationConflict {
                tier,
                dir,
                requested: bytes,
                available: *slot,
            });
        }
        *slot -= bytes;
        debug!(tier, dir, bytes, remaining = *slot, "reserved block space");
        Ok(())
    }

    /// Return previously reserved bytes to a directory (the eviction path).
    pub fn release(&self, tier: usize, dir: usize, bytes: u64) -> Result<()> {
        self.check_indices(tier, dir)?;

        let mut available = self.available.write();
        let slot = &mut available[tier][dir];
        let used = self.capacities[tier][dir] - *slot;
        if bytes > used {
            return Err(TierStoreError::ReleaseUnderflow {
                tier,
                dir,
                released: bytes,
                used,
            });
        }
        *slot += bytes;
        Ok(())
    }

    /// Sum of available bytes across every directory.
    pub fn total_available_bytes(&self) -> u64 {
        self.available
            .read()
            .iter()
            .flat_map(|tier| tier.iter())
            .sum()
    }

    /// Sum of capacities across every directory.
    pub fn total_capacity_bytes(&self) -> u64 {
        self.capacities
            .iter()
            .flat_map(|tier| tier.iter())
            .sum()
    }

    fn check_indices(&self, tier: usize, dir: usize) -> Result<()> {
        if tier >= self.capacities.len() || dir >= self.capacities[tier].len() {
            return Err(TierStoreError::NoSuchDir { tier, dir });
        }
        Ok(())
    }
}

impl CapacityView for WorkerCapacityView {
    fn tier_count(&self) -> usize {
        self.capacities.len()
    }

    fn dir_count(&self, tier: usize) -> usize {
        self.capacities[tier].len()
    }

    fn capacity_bytes(&self, tier: usize, dir: usize) -> u64 {
        self.capacities[tier][dir]
    }

    fn available_bytes(&self, tier: usize, dir: usize) -> u64 {
        self.available.read()[tier][dir]
    }

    fn medium_of(&self, tier: usize, dir: usize) -> &str {
        &self.mediums[tier][dir]
    }
}
