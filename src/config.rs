//! Worker storage configuration
//!
//! Selects the tier/directory topology, the allocator strategy, and the
//! reviewer at startup. Topology is immutable for the lifetime of an
//! allocator; changing it means rebuilding the capacity view and the
//! allocator from a fresh config.
//!
//! ```toml
//! [allocator]
//! strategy = "round-robin"
//! reviewer = "accept-all"
//!
//! [[tier]]
//! [[tier.dir]]
//! capacity_bytes = 1073741824
//! medium = "MEM"
//! path = "/mnt/ramdisk/tierstore"
//!
//! [[tier]]
//! [[tier.dir]]
//! capacity_bytes = 107374182400
//! medium = "SSD"
//! path = "/ssd0/tierstore"
//! [[tier.dir]]
//! capacity_bytes = 107374182400
//! medium = "SSD"
//! path = "/ssd1/tierstore"
//! ```

use crate::error::{Result, TierStoreError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default soft limit for the probabilistic reviewer (256 MB).
pub const DEFAULT_REVIEWER_SOFT_LIMIT_BYTES: u64 = 256 * 1024 * 1024;

/// Default hard limit for the probabilistic reviewer (64 MB).
pub const DEFAULT_REVIEWER_HARD_LIMIT_BYTES: u64 = 64 * 1024 * 1024;

/// Top-level worker storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub allocator: AllocatorConfig,

    /// Tiers in ascending order: tier 0 is the fastest.
    #[serde(default, rename = "tier")]
    pub tiers: Vec<TierConfig>,
}

/// Allocator strategy and reviewer selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocatorConfig {
    /// Strategy name: "round-robin", "greedy", or "max-free".
    #[serde(default = "default_strategy")]
    pub strategy: String,

    /// Reviewer name: "accept-all" or "probabilistic".
    #[serde(default = "default_reviewer")]
    pub reviewer: String,

    /// Probabilistic reviewer: always accept above this many free bytes.
    #[serde(default = "default_soft_limit")]
    pub reviewer_soft_limit_bytes: u64,

    /// Probabilistic reviewer: always reject at or below this many free bytes.
    #[serde(default = "default_hard_limit")]
    pub reviewer_hard_limit_bytes: u64,
}

fn default_strategy() -> String {
    "round-robin".to_string()
}

fn default_reviewer() -> String {
    "accept-all".to_string()
}

fn default_soft_limit() -> u64 {
    DEFAULT_REVIEWER_SOFT_LIMIT_BYTES
}

fn default_hard_limit() -> u64 {
    DEFAULT_REVIEWER_HARD_LIMIT_BYTES
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        AllocatorConfig {
            strategy: default_strategy(),
            reviewer: default_reviewer(),
            reviewer_soft_limit_bytes: default_soft_limit(),
            reviewer_hard_limit_bytes: default_hard_limit(),
        }
    }
}

/// One storage tier: an ordered list of directories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierConfig {
    #[serde(default, rename = "dir")]
    pub dirs: Vec<DirConfig>,
}

/// One storage directory within a tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirConfig {
    pub capacity_bytes: u64,

    /// Free-form medium label ("MEM", "SSD", "HDD", ...).
    pub medium: String,

    /// Filesystem path backing this directory. Unused by the allocator
    /// itself; carried for the I/O layer.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    /// Parse a config from a TOML string and validate it.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: StorageConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Build an in-memory topology without going through TOML.
    ///
    /// Each inner slice is one tier, fastest first; each entry is
    /// `(capacity_bytes, medium)`. Convenient for tests and benchmarks.
    pub fn from_topology(tiers: &[&[(u64, &str)]]) -> Self {
        StorageConfig {
            allocator: AllocatorConfig::default(),
            tiers: tiers
                .iter()
                .map(|dirs| TierConfig {
                    dirs: dirs
                        .iter()
                        .map(|(capacity, medium)| DirConfig {
                            capacity_bytes: *capacity,
                            medium: medium.to_string(),
                            path: None,
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.tiers.is_empty() {
            return Err(TierStoreError::InvalidConfig(
                "at least one tier is required".to_string(),
            ));
        }

        for (tier_idx, tier) in self.tiers.iter().enumerate() {
            if tier.dirs.is_empty() {
                return Err(TierStoreError::InvalidConfig(format!(
                    "tier {} has no directories",
                    tier_idx
                )));
            }
            for (dir_idx, dir) in tier.dirs.iter().enumerate() {
                if dir.capacity_bytes == 0 {
                    return Err(TierStoreError::InvalidConfig(format!(
                        "tier {}, dir {} has zero capacity",
                        tier_idx, dir_idx
                    )));
                }
                if dir.medium.is_empty() {
                    return Err(TierStoreError::InvalidConfig(format!(
                        "tier {}, dir {} has an empty medium label",
                        tier_idx, dir_idx
                    )));
                }
            }
        }

        if self.allocator.reviewer == "probabilistic"
            && self.allocator.reviewer_soft_limit_bytes <= self.allocator.reviewer_hard_limit_bytes
        {
            return Err(TierStoreError::InvalidConfig(format!(
                "probabilistic reviewer soft limit ({}) must exceed hard limit ({})",
                self.allocator.reviewer_soft_limit_bytes, self.allocator.reviewer_hard_limit_bytes
            )));
        }

        Ok(())
    }
}
