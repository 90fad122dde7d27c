//! Thread-shareable arena behind a single mutex.
//!
//! Compaction temporarily leaves neighbour bounds stale, so the whole arena
//! is guarded by one lock held for the full duration of each operation.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::arena::QueueArena;
use crate::error::ArenaError;
use crate::handle::QueueHandle;

/// Shared handle to a [`QueueArena`]; clones refer to the same arena.
#[derive(Clone)]
pub struct SharedQueueArena {
    inner: Arc<Mutex<QueueArena>>,
}

impl SharedQueueArena {
    /// Move an arena behind a shared lock.
    pub fn new(arena: QueueArena) -> Self {
        Self {
            inner: Arc::new(Mutex::new(arena)),
        }
    }

    /// See [`QueueArena::create_queue`].
    pub fn create_queue(&self) -> Result<QueueHandle, ArenaError> {
        self.lock().create_queue()
    }

    /// See [`QueueArena::destroy_queue`].
    pub fn destroy_queue(&self, handle: QueueHandle) -> Result<(), ArenaError> {
        self.lock().destroy_queue(handle)
    }

    /// See [`QueueArena::enqueue_byte`].
    pub fn enqueue_byte(&self, handle: QueueHandle, value: u8) -> Result<(), ArenaError> {
        self.lock().enqueue_byte(handle, value)
    }

    /// See [`QueueArena::dequeue_byte`].
    pub fn dequeue_byte(&self, handle: QueueHandle) -> Result<u8, ArenaError> {
        self.lock().dequeue_byte(handle)
    }

    /// See [`QueueArena::free_space`].
    pub fn free_space(&self) -> usize {
        self.lock().free_space()
    }

    /// Run several operations under one lock acquisition.
    pub fn with<R>(&self, f: impl FnOnce(&mut QueueArena) -> R) -> R {
        f(&mut self.lock())
    }

    // Poisoning is ignored; run `validate` to inspect the arena after a
    // panicking holder.
    fn lock(&self) -> MutexGuard<'_, QueueArena> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn clones_share_one_arena() {
        let shared = SharedQueueArena::new(QueueArena::with_defaults());
        let q = shared.create_queue().unwrap();
        let other = shared.clone();
        other.enqueue_byte(q, 42).unwrap();
        assert_eq!(shared.dequeue_byte(q), Ok(42));
    }

    #[test]
    fn threads_keep_per_queue_order() {
        let shared = SharedQueueArena::new(QueueArena::with_defaults());
        let queues: Vec<_> = (0..4).map(|_| shared.create_queue().unwrap()).collect();

        let workers: Vec<_> = queues
            .iter()
            .map(|&q| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for b in 0..200u8 {
                        shared.enqueue_byte(q, b).unwrap();
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        shared.with(|arena| {
            assert_eq!(arena.validate(), Ok(()));
            for &q in &queues {
                for b in 0..200u8 {
                    assert_eq!(arena.dequeue_byte(q), Ok(b));
                }
            }
        });
    }
}
