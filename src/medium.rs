//! Well-known medium labels.
//!
//! Medium labels are free-form strings, not a closed enum: operators may
//! define custom media (e.g. "NVME") in their storage config. These are the
//! conventional labels for the common three-tier setup.

/// Memory-backed storage.
pub const MEDIUM_MEM: &str = "MEM";

/// Solid-state storage.
pub const MEDIUM_SSD: &str = "SSD";

/// Spinning-disk storage.
pub const MEDIUM_HDD: &str = "HDD";
