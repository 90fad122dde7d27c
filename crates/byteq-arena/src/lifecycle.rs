//! Queue creation and destruction.

use tracing::{debug, warn};

use crate::arena::QueueArena;
use crate::config::QUEUE_RESERVATION;
use crate::descriptor::{QueueDescriptor, HEADER_LEN};
use crate::error::ArenaError;
use crate::handle::QueueHandle;

impl QueueArena {
    /// Create an empty queue and return its handle.
    ///
    /// Reserves a header entry plus one data slot. The slot is placed below
    /// the newest queue with a head start drawn from the mid space, or at
    /// the top edge for the first queue; if the mid space is too small the
    /// storage area is compacted first.
    ///
    /// Fails with [`ArenaError::OutOfSpace`] when the queue table is full or
    /// fewer than five bytes are free. Nothing is mutated on failure.
    pub fn create_queue(&mut self) -> Result<QueueHandle, ArenaError> {
        let count = self.arena.queue_count();
        let free = self.arena.free_space();
        if count >= self.max_queues() || free < QUEUE_RESERVATION {
            warn!(count, free, "create_queue rejected");
            return Err(ArenaError::out_of_space(QUEUE_RESERVATION, free));
        }

        let slot = self.arena.new_queue_slot(self.max_queues(), &mut self.stats);
        let id = count + 1;
        self.arena.set_queue_count(id);
        self.arena.set_descriptor(QueueDescriptor::new_empty(id, slot));
        self.arena.adjust_free_space(-(QUEUE_RESERVATION as isize));

        let handle = QueueHandle::new(self.arena_id, self.next_key);
        self.next_key = self.next_key.wrapping_add(1);
        self.handles.insert(handle);
        debug!(id, slot, key = handle.key(), "created queue");
        Ok(handle)
    }

    /// Destroy a queue, releasing its header and segment.
    ///
    /// Every newer queue is renumbered down by one. Storage is not moved:
    /// the released segment becomes slack below the next older queue, or
    /// mid space if the destroyed queue was the newest.
    ///
    /// Fails with [`ArenaError::IllegalOperation`] when no queue exists or
    /// the handle is not live.
    pub fn destroy_queue(&mut self, handle: QueueHandle) -> Result<(), ArenaError> {
        let id = self.resolve(handle)?;
        let desc = self.arena.descriptor(id);
        let released = HEADER_LEN + desc.footprint();

        self.arena.remove_descriptor(id);
        let remaining = self.arena.queue_count() - 1;
        self.arena.set_queue_count(remaining);
        self.arena.adjust_free_space(released as isize);
        self.handles.shift_remove(&handle);
        debug!(id, released, remaining, "destroyed queue");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::error::{ArenaError, IllegalReason};
    use crate::{ArenaConfig, QueueArena};

    #[test]
    fn first_queue_sits_at_top_edge() {
        let mut arena = QueueArena::with_defaults();
        let q = arena.create_queue().unwrap();
        let desc = arena.descriptor(q).unwrap();
        assert_eq!(desc.front(), 2047);
        assert_eq!(desc.back(), 2047);
        assert!(desc.is_empty());
        assert_eq!(arena.free_space(), 2040);
    }

    #[test]
    fn second_queue_leaves_head_start_for_first() {
        let mut arena = QueueArena::with_defaults();
        let q0 = arena.create_queue().unwrap();
        let q1 = arena.create_queue().unwrap();
        assert_eq!(arena.descriptor(q0).unwrap().back(), 2047);
        // mid = 2040, buffer = min(2040 / 1, 2040 * 1 / 64) = 31.
        assert_eq!(arena.descriptor(q1).unwrap().front(), 2016);
        assert_eq!(arena.free_space(), 2035);
    }

    #[test]
    fn create_at_queue_limit_fails_without_mutation() {
        let mut arena = QueueArena::new(ArenaConfig::new(256).with_max_queues(2)).unwrap();
        let _a = arena.create_queue().unwrap();
        let _b = arena.create_queue().unwrap();
        let layouts_before = arena.layouts();
        let free_before = arena.free_space();

        let err = arena.create_queue().unwrap_err();

        assert!(err.is_out_of_space());
        assert_eq!(arena.queue_count(), 2);
        assert_eq!(arena.free_space(), free_before);
        assert_eq!(arena.layouts(), layouts_before);
    }

    #[test]
    fn create_fails_when_fewer_than_five_bytes_free() {
        // 3 prelude + 5 for the first queue + 4 spare.
        let mut arena = QueueArena::new(ArenaConfig::new(12)).unwrap();
        let _q = arena.create_queue().unwrap();
        assert_eq!(arena.free_space(), 4);
        assert_eq!(
            arena.create_queue(),
            Err(ArenaError::OutOfSpace {
                requested: 5,
                available: 4
            })
        );
    }

    #[test]
    fn destroy_without_queues_is_illegal() {
        let mut arena = QueueArena::with_defaults();
        let q = arena.create_queue().unwrap();
        arena.destroy_queue(q).unwrap();
        assert_eq!(
            arena.destroy_queue(q),
            Err(ArenaError::IllegalOperation {
                reason: IllegalReason::NoQueues
            })
        );
    }

    #[test]
    fn destroyed_handle_is_rejected() {
        let mut arena = QueueArena::with_defaults();
        let q0 = arena.create_queue().unwrap();
        let _q1 = arena.create_queue().unwrap();
        arena.destroy_queue(q0).unwrap();
        assert_eq!(
            arena.destroy_queue(q0),
            Err(ArenaError::IllegalOperation {
                reason: IllegalReason::UnknownQueue
            })
        );
        assert!(!arena.contains(q0));
    }

    #[test]
    fn destroy_renumbers_newer_queues() {
        let mut arena = QueueArena::with_defaults();
        let q0 = arena.create_queue().unwrap();
        let q1 = arena.create_queue().unwrap();
        let q2 = arena.create_queue().unwrap();
        let q2_front = arena.descriptor(q2).unwrap().front();

        arena.destroy_queue(q1).unwrap();

        assert_eq!(arena.queue_count(), 2);
        assert_eq!(arena.queue_id(q0), Some(1));
        assert_eq!(arena.queue_id(q2), Some(2));
        let desc = arena.descriptor(q2).unwrap();
        assert_eq!(desc.id(), 2);
        assert_eq!(desc.front(), q2_front, "storage is not moved");
    }

    #[test]
    fn destroy_returns_header_and_segment_to_ledger() {
        let mut arena = QueueArena::with_defaults();
        let q = arena.create_queue().unwrap();
        for b in 0..10 {
            arena.enqueue_byte(q, b).unwrap();
        }
        assert_eq!(arena.free_space(), 2045 - 4 - 10);
        arena.destroy_queue(q).unwrap();
        assert_eq!(arena.free_space(), 2045);
        assert_eq!(arena.mid_space(), 2045);
    }

    #[test]
    fn handle_from_another_arena_is_rejected() {
        let mut a = QueueArena::with_defaults();
        let mut b = QueueArena::with_defaults();
        let qa = a.create_queue().unwrap();
        let qb = b.create_queue().unwrap();
        assert_eq!(qa.key(), qb.key());
        b.enqueue_byte(qb, 42).unwrap();

        let unknown = ArenaError::IllegalOperation {
            reason: IllegalReason::UnknownQueue,
        };
        assert!(!b.contains(qa));
        assert_eq!(b.dequeue_byte(qa), Err(unknown));
        assert_eq!(b.enqueue_byte(qa, 1), Err(unknown));
        assert_eq!(b.destroy_queue(qa), Err(unknown));
        assert_eq!(b.queue_len(qb), Ok(1));
        assert_eq!(b.dequeue_byte(qb), Ok(42));
    }

    #[test]
    fn handles_are_never_reused() {
        let mut arena = QueueArena::with_defaults();
        let q0 = arena.create_queue().unwrap();
        arena.destroy_queue(q0).unwrap();
        let q1 = arena.create_queue().unwrap();
        assert_ne!(q0, q1);
        assert!(arena.contains(q1));
        assert!(!arena.contains(q0));
    }
}
