//! Arena configuration parameters.

use std::error::Error;
use std::fmt;

use crate::layout::PRELUDE_LEN;

/// Bytes reserved per queue at creation: one header plus one data slot.
pub const QUEUE_RESERVATION: usize = crate::descriptor::HEADER_LEN + 1;

/// Configuration for a [`QueueArena`](crate::QueueArena).
///
/// Controls the arena's byte capacity and how many queues it may host.
/// Validated at construction; all values are immutable after creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Total size of the arena in bytes, including the prelude and the
    /// header table.
    ///
    /// Default: 2048. Must be at most [`ArenaConfig::MAX_CAPACITY`] because
    /// segment indices are stored in 12 bits.
    pub capacity: usize,

    /// Maximum number of live queues.
    ///
    /// Default: 64. Must be in `1..=64` because identifiers are stored in
    /// 6 bits.
    pub max_queues: u8,
}

impl ArenaConfig {
    /// Default arena size in bytes.
    pub const DEFAULT_CAPACITY: usize = 2048;

    /// Default (and largest) queue count.
    pub const DEFAULT_MAX_QUEUES: u8 = 64;

    /// Largest addressable arena: 12-bit `front`/`back` indices.
    pub const MAX_CAPACITY: usize = 1 << 12;

    /// Smallest arena that can host a single queue.
    pub const MIN_CAPACITY: usize = PRELUDE_LEN + QUEUE_RESERVATION;

    /// Create a config with the given capacity and the default queue limit.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            max_queues: Self::DEFAULT_MAX_QUEUES,
        }
    }

    /// Builder-style override of the queue limit.
    pub fn with_max_queues(mut self, max_queues: u8) -> Self {
        self.max_queues = max_queues;
        self
    }

    /// Check that every parameter fits the on-arena encoding.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity > Self::MAX_CAPACITY {
            return Err(ConfigError::CapacityTooLarge {
                capacity: self.capacity,
                max: Self::MAX_CAPACITY,
            });
        }
        if self.capacity < Self::MIN_CAPACITY {
            return Err(ConfigError::CapacityTooSmall {
                capacity: self.capacity,
                min: Self::MIN_CAPACITY,
            });
        }
        if self.max_queues == 0 || self.max_queues > Self::DEFAULT_MAX_QUEUES {
            return Err(ConfigError::MaxQueuesOutOfRange {
                max_queues: self.max_queues,
            });
        }
        Ok(())
    }

    /// Bytes available to headers and segments once the prelude is reserved.
    pub fn usable_bytes(&self) -> usize {
        self.capacity - PRELUDE_LEN
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

/// Rejected [`ArenaConfig`] parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Capacity exceeds what 12-bit segment indices can address.
    CapacityTooLarge {
        /// Requested capacity in bytes.
        capacity: usize,
        /// Largest supported capacity.
        max: usize,
    },
    /// Capacity cannot hold the prelude and one queue.
    CapacityTooSmall {
        /// Requested capacity in bytes.
        capacity: usize,
        /// Smallest supported capacity.
        min: usize,
    },
    /// Queue limit is zero or does not fit a 6-bit identifier.
    MaxQueuesOutOfRange {
        /// Requested queue limit.
        max_queues: u8,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityTooLarge { capacity, max } => {
                write!(f, "arena capacity {capacity} exceeds maximum {max}")
            }
            Self::CapacityTooSmall { capacity, min } => {
                write!(f, "arena capacity {capacity} is below minimum {min}")
            }
            Self::MaxQueuesOutOfRange { max_queues } => {
                write!(f, "max_queues {max_queues} must be in 1..=64")
            }
        }
    }
}

impl Error for ConfigError {}
