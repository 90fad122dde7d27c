//! Test utilities for byteq development.
//!
//! Provides a [`ReferenceModel`] that mirrors the arena's observable
//! behaviour with one `VecDeque` per queue and no compaction at all, plus
//! seeded operation sequences in [`fixtures`]. Driving the real arena and the
//! model with the same operations and comparing every result checks FIFO
//! order, ledger accounting, and compaction transparency in one pass.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::collections::VecDeque;

pub use fixtures::{scripted_ops, seeded_ops, Op, WorkloadMix};

/// Prelude bytes ahead of the header table (queue counter + ledger).
pub const PRELUDE_LEN: usize = 3;

/// Header bytes per queue.
pub const HEADER_LEN: usize = 4;

/// Outcome class predicted by the model for a rejected operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelError {
    OutOfSpace,
    IllegalOperation,
}

/// Compaction-free model of a queue arena.
///
/// Queues are kept in identifier order, so index `i` is queue `i + 1` and
/// destroying a queue renumbers every later one, as in the arena. Space is
/// accounted the same way: every queue costs a header plus its length, with
/// an empty queue still holding one reserved slot.
pub struct ReferenceModel {
    capacity: usize,
    max_queues: usize,
    queues: Vec<VecDeque<u8>>,
}

impl ReferenceModel {
    pub fn new(capacity: usize, max_queues: usize) -> Self {
        Self {
            capacity,
            max_queues,
            queues: Vec::with_capacity(max_queues),
        }
    }

    /// Free bytes the arena's ledger must report.
    pub fn free_space(&self) -> usize {
        let committed: usize = self
            .queues
            .iter()
            .map(|q| HEADER_LEN + q.len().max(1))
            .sum();
        self.capacity - PRELUDE_LEN - committed
    }

    pub fn queue_count(&self) -> usize {
        self.queues.len()
    }

    pub fn len(&self, index: usize) -> Option<usize> {
        self.queues.get(index).map(VecDeque::len)
    }

    /// Contents of queue `index`, oldest first.
    pub fn contents(&self, index: usize) -> Option<Vec<u8>> {
        self.queues.get(index).map(|q| q.iter().copied().collect())
    }

    /// Create a queue; returns its index.
    pub fn create(&mut self) -> Result<usize, ModelError> {
        if self.queues.len() >= self.max_queues || self.free_space() < HEADER_LEN + 1 {
            return Err(ModelError::OutOfSpace);
        }
        self.queues.push(VecDeque::new());
        Ok(self.queues.len() - 1)
    }

    pub fn destroy(&mut self, index: usize) -> Result<(), ModelError> {
        if index >= self.queues.len() {
            return Err(ModelError::IllegalOperation);
        }
        self.queues.remove(index);
        Ok(())
    }

    pub fn enqueue(&mut self, index: usize, value: u8) -> Result<(), ModelError> {
        let queue = self
            .queues
            .get(index)
            .ok_or(ModelError::IllegalOperation)?;
        if !queue.is_empty() && self.free_space() == 0 {
            return Err(ModelError::OutOfSpace);
        }
        self.queues[index].push_back(value);
        Ok(())
    }

    pub fn dequeue(&mut self, index: usize) -> Result<u8, ModelError> {
        self.queues
            .get_mut(index)
            .and_then(VecDeque::pop_front)
            .ok_or(ModelError::IllegalOperation)
    }
}
