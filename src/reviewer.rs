//! Reviewers: pluggable veto policies for placement decisions
//!
//! A reviewer gets the last word on a candidate directory that has already
//! passed the capacity check. Rejecting a candidate only skips it for the
//! current allocation call; the directory stays eligible on later calls.
//!
//! Reviewers may be consulted several times for the same candidate within one
//! allocation pass, so implementations must be side-effect-idempotent from
//! the allocator's perspective.

use crate::config::StorageConfig;
use crate::error::{Result, TierStoreError};
use crate::view::CapacityView;
use rand::Rng;
use std::sync::Arc;

/// Veto policy consulted after a capacity-sufficient candidate is found.
pub trait Reviewer: Send + Sync {
    /// Approve or veto placing `block_size` bytes on `(tier, dir)`.
    fn accept(&self, view: &dyn CapacityView, tier: usize, dir: usize, block_size: u64) -> bool;
}

/// Build the reviewer named in the config.
pub fn create_reviewer(config: &StorageConfig) -> Result<Arc<dyn Reviewer>> {
    match config.allocator.reviewer.as_str() {
        "accept-all" => Ok(Arc::new(AcceptAll)),
        "probabilistic" => Ok(Arc::new(ProbabilisticReviewer::new(
            config.allocator.reviewer_soft_limit_bytes,
            config.allocator.reviewer_hard_limit_bytes,
        )?)),
        other => Err(TierStoreError::UnknownReviewer(other.to_string())),
    }
}

/// The default reviewer: approves everything.
pub struct AcceptAll;

impl Reviewer for AcceptAll {
    fn accept(&self, _view: &dyn CapacityView, _tier: usize, _dir: usize, _block_size: u64) -> bool {
        true
    }
}

/// Reviewer that keeps headroom in each directory.
///
/// Above the soft limit of free bytes every candidate is accepted; at or
/// below the hard limit every candidate is rejected. In between, acceptance
/// probability falls linearly toward zero, so directories fill gradually
/// rather than slamming into the hard limit all at once.
pub struct ProbabilisticReviewer {
    soft_limit_bytes: u64,
    hard_limit_bytes: u64,
}

impl ProbabilisticReviewer {
    pub fn new(soft_limit_bytes: u64, hard_limit_bytes: u64) -> Result<Self> {
        if soft_limit_bytes <= hard_limit_bytes {
            return Err(TierStoreError::InvalidConfig(format!(
                "probabilistic reviewer soft limit ({}) must exceed hard limit ({})",
                soft_limit_bytes, hard_limit_bytes
            )));
        }
        Ok(ProbabilisticReviewer {
            soft_limit_bytes,
            hard_limit_bytes,
        })
    }
}

impl Reviewer for ProbabilisticReviewer {
    fn accept(&self, view: &dyn CapacityView, tier: usize, dir: usize, _block_size: u64) -> bool {
        let available = view.available_bytes(tier, dir);
        if available >= self.soft_limit_bytes {
            return true;
        }
        if available <= self.hard_limit_bytes {
            return false;
        }

        let chance = (available - self.hard_limit_bytes) as f64
            / (self.soft_limit_bytes - self.hard_limit_bytes) as f64;
        rand::thread_rng().gen::<f64>() < chance
    }
}
