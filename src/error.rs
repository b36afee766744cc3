use thiserror::Error;

#[derive(Error, Debug)]
pub enum TierStoreError {
    #[error("Invalid storage config: {0}")]
    InvalidConfig(String),

    #[error("Unknown allocator strategy: {0}")]
    UnknownStrategy(String),

    #[error("Unknown reviewer: {0}")]
    UnknownReviewer(String),

    #[error("No such directory: tier {tier}, dir {dir}")]
    NoSuchDir { tier: usize, dir: usize },

    #[error(
        "Reservation conflict: tier {tier}, dir {dir} has {available} bytes, {requested} requested"
    )]
    ReservationConflict {
        tier: usize,
        dir: usize,
        requested: u64,
        available: u64,
    },

    #[error("Release of {released} bytes exceeds {used} used bytes in tier {tier}, dir {dir}")]
    ReleaseUnderflow {
        tier: usize,
        dir: usize,
        released: u64,
        used: u64,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, TierStoreError>;
