//! The owning allocator object.
//!
//! [`QueueArena`] ties the byte buffer, header table, ledger, and compaction
//! engine together behind the public queue API. Queue lifecycle lives in
//! `lifecycle.rs`, byte traffic in `fifo.rs`; this module holds construction,
//! handle resolution, and read-only queries.

use indexmap::IndexSet;
use smallvec::SmallVec;

use crate::config::{ArenaConfig, ConfigError};
use crate::descriptor::QueueDescriptor;
use crate::error::{ArenaError, IllegalReason};
use crate::handle::{next_arena_id, QueueHandle};
use crate::layout::Arena;
use crate::stats::CompactionStats;

/// A fixed-capacity arena hosting up to `max_queues` byte FIFO queues.
///
/// All queues share one byte buffer allocated at construction. No operation
/// allocates afterwards: the handle index is pre-sized to the queue limit.
///
/// Every mutating method takes `&mut self`, so a single arena is never
/// accessed concurrently. Wrap it in a
/// [`SharedQueueArena`](crate::SharedQueueArena) to share it across threads.
pub struct QueueArena {
    pub(crate) arena: Arena,
    pub(crate) config: ArenaConfig,
    /// Live handles in identifier order: position `i` is queue `i + 1`.
    pub(crate) handles: IndexSet<QueueHandle>,
    /// Instance id stamped into every handle this arena issues.
    pub(crate) arena_id: u32,
    pub(crate) next_key: u32,
    pub(crate) stats: CompactionStats,
}

impl QueueArena {
    /// Create an arena from a validated config.
    pub fn new(config: ArenaConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            arena: Arena::new(config.capacity),
            handles: IndexSet::with_capacity(config.max_queues as usize),
            config,
            arena_id: next_arena_id(),
            next_key: 0,
            stats: CompactionStats::default(),
        })
    }

    /// Create a 2048-byte arena with room for 64 queues.
    pub fn with_defaults() -> Self {
        let config = ArenaConfig::default();
        Self {
            arena: Arena::new(config.capacity),
            handles: IndexSet::with_capacity(config.max_queues as usize),
            config,
            arena_id: next_arena_id(),
            next_key: 0,
            stats: CompactionStats::default(),
        }
    }

    /// The config this arena was built with.
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Total size in bytes.
    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    /// Maximum number of live queues.
    pub fn max_queues(&self) -> usize {
        self.config.max_queues as usize
    }

    /// Number of live queues.
    pub fn queue_count(&self) -> usize {
        self.arena.queue_count()
    }

    /// Bytes not committed to any queue header or segment.
    pub fn free_space(&self) -> usize {
        self.arena.free_space()
    }

    /// Unowned bytes between the header table and the storage area.
    ///
    /// Always at most [`free_space`](Self::free_space); the difference is
    /// slack held between segments.
    pub fn mid_space(&self) -> usize {
        self.arena.mid_space()
    }

    /// Whether `handle` refers to a live queue.
    pub fn contains(&self, handle: QueueHandle) -> bool {
        self.handles.contains(&handle)
    }

    /// The queue's current 1-based identifier, which changes when a lower
    /// queue is destroyed.
    pub fn queue_id(&self, handle: QueueHandle) -> Option<usize> {
        self.handles.get_index_of(&handle).map(|index| index + 1)
    }

    /// The queue's current descriptor.
    pub fn descriptor(&self, handle: QueueHandle) -> Result<QueueDescriptor, ArenaError> {
        let id = self.resolve(handle)?;
        Ok(self.arena.descriptor(id))
    }

    /// Number of bytes queued.
    pub fn queue_len(&self, handle: QueueHandle) -> Result<usize, ArenaError> {
        self.descriptor(handle).map(|desc| desc.len())
    }

    /// Whether the queue holds no bytes.
    pub fn is_empty(&self, handle: QueueHandle) -> Result<bool, ArenaError> {
        self.descriptor(handle).map(|desc| desc.is_empty())
    }

    /// Live handles in identifier order.
    pub fn handles(&self) -> impl Iterator<Item = QueueHandle> + '_ {
        self.handles.iter().copied()
    }

    /// Snapshot of every descriptor in identifier order.
    pub fn layouts(&self) -> SmallVec<[QueueDescriptor; 8]> {
        (1..=self.arena.queue_count())
            .map(|id| self.arena.descriptor(id))
            .collect()
    }

    /// Compaction work performed since construction or the last reset.
    pub fn stats(&self) -> CompactionStats {
        self.stats
    }

    /// Zero the compaction counters.
    pub fn reset_stats(&mut self) {
        self.stats = CompactionStats::default();
    }

    /// Map a handle to its current identifier.
    pub(crate) fn resolve(&self, handle: QueueHandle) -> Result<usize, ArenaError> {
        if self.arena.queue_count() == 0 {
            return Err(ArenaError::illegal(IllegalReason::NoQueues));
        }
        if handle.arena_id() != self.arena_id {
            return Err(ArenaError::illegal(IllegalReason::UnknownQueue));
        }
        self.queue_id(handle)
            .ok_or(ArenaError::illegal(IllegalReason::UnknownQueue))
    }
}

impl Default for QueueArena {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_invalid_config() {
        let result = QueueArena::new(ArenaConfig::new(5000));
        assert!(matches!(result, Err(ConfigError::CapacityTooLarge { .. })));
    }

    #[test]
    fn fresh_arena_queries() {
        let arena = QueueArena::with_defaults();
        assert_eq!(arena.capacity(), 2048);
        assert_eq!(arena.max_queues(), 64);
        assert_eq!(arena.queue_count(), 0);
        assert_eq!(arena.free_space(), 2045);
        assert_eq!(arena.mid_space(), 2045);
        assert!(arena.layouts().is_empty());
        assert_eq!(arena.stats(), CompactionStats::default());
    }

    #[test]
    fn config_reflects_construction() {
        let arena = QueueArena::new(ArenaConfig::new(512).with_max_queues(8)).unwrap();
        assert_eq!(arena.config(), &ArenaConfig::new(512).with_max_queues(8));
        assert_eq!(arena.capacity(), 512);
        assert_eq!(arena.max_queues(), 8);
    }

    #[test]
    fn reset_stats_zeroes_counters() {
        let mut arena = QueueArena::with_defaults();
        let q0 = arena.create_queue().unwrap();
        let _q1 = arena.create_queue().unwrap();
        for b in 0..40u8 {
            arena.enqueue_byte(q0, b).unwrap();
        }
        assert!(arena.stats().total_runs() > 0);
        assert!(arena.stats().bytes_moved > 0);

        arena.reset_stats();

        assert_eq!(arena.stats(), CompactionStats::default());
        assert_eq!(arena.queue_len(q0), Ok(40));
    }

    #[test]
    fn resolve_foreign_handle_reports_unknown_queue() {
        let mut arena = QueueArena::with_defaults();
        let _q = arena.create_queue().unwrap();
        let foreign = QueueHandle::new(arena.arena_id.wrapping_add(1), 0);
        assert_eq!(
            arena.resolve(foreign),
            Err(ArenaError::IllegalOperation {
                reason: IllegalReason::UnknownQueue
            })
        );
    }

    #[test]
    fn resolve_without_queues_reports_no_queues() {
        let arena = QueueArena::with_defaults();
        let err = arena.resolve(QueueHandle::new(arena.arena_id, 0)).unwrap_err();
        assert_eq!(
            err,
            ArenaError::IllegalOperation {
                reason: IllegalReason::NoQueues
            }
        );
    }

    #[test]
    fn queue_ids_track_creation_order() {
        let mut arena = QueueArena::with_defaults();
        let a = arena.create_queue().unwrap();
        let b = arena.create_queue().unwrap();
        assert_eq!(arena.queue_id(a), Some(1));
        assert_eq!(arena.queue_id(b), Some(2));
        assert_eq!(arena.handles().collect::<Vec<_>>(), vec![a, b]);
    }

    #[test]
    fn layouts_follow_identifier_order() {
        let mut arena = QueueArena::with_defaults();
        arena.create_queue().unwrap();
        arena.create_queue().unwrap();
        let layouts = arena.layouts();
        assert_eq!(layouts.len(), 2);
        assert_eq!(layouts[0].id(), 1);
        assert_eq!(layouts[1].id(), 2);
        assert!(layouts[1].front() < layouts[0].back());
    }
}
