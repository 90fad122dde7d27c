//! Queue handles.
//!
//! Queue identifiers are dense and shift down whenever a lower queue is
//! destroyed, so they cannot be handed out directly. A [`QueueHandle`]
//! instead carries a key that the arena issues once and never reuses; the
//! arena resolves it to the queue's current identifier in O(1).
//!
//! Every handle is also tagged with the issuing arena's instance id, so a
//! handle presented to a different arena never resolves.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

/// Counter for unique arena instance ids.
static ARENA_INSTANCE_COUNTER: AtomicU32 = AtomicU32::new(1);

/// Allocate a fresh arena instance id. Thread-safe.
pub(crate) fn next_arena_id() -> u32 {
    ARENA_INSTANCE_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// Stable reference to one queue inside a [`QueueArena`](crate::QueueArena).
///
/// Handles are cheap to copy. A handle stays valid until its queue is
/// destroyed; after that, or when passed to an arena that did not issue it,
/// every operation on it fails with
/// [`IllegalReason::UnknownQueue`](crate::IllegalReason::UnknownQueue).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueueHandle {
    arena: u32,
    key: u32,
}

impl QueueHandle {
    pub(crate) fn new(arena: u32, key: u32) -> Self {
        Self { arena, key }
    }

    /// Instance id of the arena that issued this handle.
    pub fn arena_id(&self) -> u32 {
        self.arena
    }

    /// The arena-issued key. Unique for the lifetime of the arena.
    pub fn key(&self) -> u32 {
        self.key
    }
}

impl fmt::Display for QueueHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QueueHandle({}:{})", self.arena, self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_compare_by_arena_and_key() {
        let a = QueueHandle::new(1, 1);
        let b = QueueHandle::new(1, 2);
        assert_ne!(a, b);
        assert_eq!(a, QueueHandle::new(1, 1));
        assert_ne!(a, QueueHandle::new(2, 1));
        assert_eq!(b.key(), 2);
        assert_eq!(b.arena_id(), 1);
    }

    #[test]
    fn arena_ids_are_unique() {
        let first = next_arena_id();
        let second = next_arena_id();
        assert_ne!(first, second);
    }

    #[test]
    fn display_shows_arena_and_key() {
        assert_eq!(QueueHandle::new(3, 7).to_string(), "QueueHandle(3:7)");
    }
}
