//! Arena-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during queue operations.
///
/// Both kinds are final: the arena never retries internally. Compaction is
/// attempted before `OutOfSpace` is reported for a create or enqueue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The commit cannot be satisfied even after compaction.
    OutOfSpace {
        /// Number of bytes the operation needed.
        requested: usize,
        /// Free bytes recorded by the ledger at the time of the request.
        available: usize,
    },
    /// The request is structurally invalid for the arena's current state.
    IllegalOperation {
        /// Which precondition was violated.
        reason: IllegalReason,
    },
}

/// Why an operation was rejected as [`ArenaError::IllegalOperation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalReason {
    /// No queue exists in the arena.
    NoQueues,
    /// The queue holds no bytes.
    QueueEmpty,
    /// The handle was destroyed or issued by another arena.
    UnknownQueue,
}

impl ArenaError {
    pub(crate) fn out_of_space(requested: usize, available: usize) -> Self {
        Self::OutOfSpace {
            requested,
            available,
        }
    }

    pub(crate) fn illegal(reason: IllegalReason) -> Self {
        Self::IllegalOperation { reason }
    }

    /// Whether this error signals resource exhaustion rather than misuse.
    pub fn is_out_of_space(&self) -> bool {
        matches!(self, Self::OutOfSpace { .. })
    }
}

impl fmt::Display for IllegalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoQueues => write!(f, "no queues exist"),
            Self::QueueEmpty => write!(f, "queue is empty"),
            Self::UnknownQueue => write!(f, "queue handle is not live"),
        }
    }
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfSpace {
                requested,
                available,
            } => {
                write!(
                    f,
                    "out of space: requested {requested} bytes, {available} bytes free"
                )
            }
            Self::IllegalOperation { reason } => {
                write!(f, "illegal operation: {reason}")
            }
        }
    }
}

impl Error for ArenaError {}
