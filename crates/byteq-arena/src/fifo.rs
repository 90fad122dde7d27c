//! Byte traffic: enqueue, dequeue, peek.
//!
//! A segment grows toward lower addresses. `front` is the fixed anchor that
//! always holds the oldest byte; dequeue reads it and slides the rest of the
//! segment up by one, which costs O(len) but keeps every queue's high bound
//! stable for the neighbour arithmetic used by placement and compaction.

use tracing::{trace, warn};

use crate::arena::QueueArena;
use crate::error::{ArenaError, IllegalReason};
use crate::handle::QueueHandle;

impl QueueArena {
    /// Append one byte to the back of a queue.
    ///
    /// An empty queue writes into the slot reserved at creation. Otherwise
    /// the queue needs a free byte directly below its `back`; when there is
    /// none the arena first packs the storage area if the mid space is
    /// exhausted, then lowers every newer segment to open room.
    ///
    /// Fails with [`ArenaError::OutOfSpace`] when the ledger shows no free
    /// byte, and [`ArenaError::IllegalOperation`] for a dead handle.
    pub fn enqueue_byte(&mut self, handle: QueueHandle, value: u8) -> Result<(), ArenaError> {
        let id = self.resolve(handle)?;
        let mut desc = self.arena.descriptor(id);

        if desc.is_empty() {
            self.arena.set_byte(desc.back(), value);
            desc.set_empty(false);
            self.arena.set_descriptor(desc);
            trace!(id, addr = desc.back(), value, "enqueued into reserved slot");
            return Ok(());
        }

        let free = self.arena.free_space();
        if free == 0 {
            warn!(id, len = desc.len(), "enqueue rejected");
            return Err(ArenaError::out_of_space(1, 0));
        }

        if self.room_below(id) == 0 {
            if self.arena.mid_space() == 0 {
                self.arena.shift_right(&mut self.stats);
            }
            if self.room_below(id) == 0 {
                self.arena.shift_left(id, self.max_queues(), &mut self.stats);
            }
            desc = self.arena.descriptor(id);
        }
        debug_assert!(self.room_below(id) > 0, "compaction left queue {id} boxed in");

        let addr = desc.back() - 1;
        desc.set_bounds(desc.front(), addr);
        self.arena.set_descriptor(desc);
        self.arena.set_byte(addr, value);
        self.arena.adjust_free_space(-1);
        trace!(id, addr, value, "enqueued");
        Ok(())
    }

    /// Remove and return the oldest byte of a queue.
    ///
    /// Fails with [`ArenaError::IllegalOperation`] when no queue exists, the
    /// handle is dead, or the queue is empty.
    pub fn dequeue_byte(&mut self, handle: QueueHandle) -> Result<u8, ArenaError> {
        let id = self.resolve(handle)?;
        let mut desc = self.arena.descriptor(id);
        if desc.is_empty() {
            return Err(ArenaError::illegal(IllegalReason::QueueEmpty));
        }

        let (front, back) = (desc.front(), desc.back());
        let value = self.arena.byte(front);
        if front == back {
            // The slot stays reserved as the empty queue's placeholder.
            desc.set_empty(true);
        } else {
            self.arena.move_bytes(back..=front - 1, back + 1);
            desc.set_bounds(front, back + 1);
            self.arena.adjust_free_space(1);
        }
        self.arena.set_descriptor(desc);
        trace!(id, value, remaining = desc.len(), "dequeued");
        Ok(value)
    }

    /// Return the oldest byte of a queue without removing it.
    pub fn peek_byte(&self, handle: QueueHandle) -> Result<u8, ArenaError> {
        let id = self.resolve(handle)?;
        let desc = self.arena.descriptor(id);
        if desc.is_empty() {
            return Err(ArenaError::illegal(IllegalReason::QueueEmpty));
        }
        Ok(self.arena.byte(desc.front()))
    }

    /// Free bytes directly below queue `id`'s `back`.
    fn room_below(&self, id: usize) -> usize {
        let back = self.arena.descriptor(id).back();
        if id == self.arena.queue_count() {
            back - self.arena.header_length()
        } else {
            back - self.arena.descriptor(id + 1).front() - 1
        }
    }
}
