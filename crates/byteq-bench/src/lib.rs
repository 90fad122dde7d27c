//! Benchmark profiles and utilities for the byteq queue arena.
//!
//! Provides pre-built arenas and a tolerant operation driver for benchmarks
//! and examples:
//!
//! - [`prefilled_arena`]: `n` queues each holding `bytes_per_queue` bytes
//! - [`replay_ops`]: apply a fixture sequence, counting rejected operations

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use byteq_arena::{ArenaConfig, QueueArena, QueueHandle};
use byteq_test_utils::Op;

/// Tally of a [`replay_ops`] run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Operations that succeeded.
    pub applied: usize,
    /// Operations rejected with `OutOfSpace`.
    pub out_of_space: usize,
    /// Operations rejected with `IllegalOperation` or skipped for lack of a
    /// target queue.
    pub illegal: usize,
}

/// Build a default-size arena with `queues` queues, each holding
/// `bytes_per_queue` bytes enqueued round-robin.
///
/// Returns `None` if the requested fill does not fit.
pub fn prefilled_arena(queues: usize, bytes_per_queue: usize) -> Option<(QueueArena, Vec<QueueHandle>)> {
    let mut arena = QueueArena::new(ArenaConfig::default()).ok()?;
    let handles = (0..queues)
        .map(|_| arena.create_queue().ok())
        .collect::<Option<Vec<_>>>()?;
    for i in 0..bytes_per_queue {
        for &q in &handles {
            arena.enqueue_byte(q, i as u8).ok()?;
        }
    }
    Some((arena, handles))
}

/// Apply `ops` to `arena`, keeping `handles` in identifier order.
///
/// Rejected operations are counted rather than propagated, so random
/// workloads can run to completion.
pub fn replay_ops(arena: &mut QueueArena, handles: &mut Vec<QueueHandle>, ops: &[Op]) -> ReplaySummary {
    let mut summary = ReplaySummary::default();
    for &op in ops {
        let outcome = match (op, op.target(handles.len())) {
            (Op::Create, _) => arena.create_queue().map(|q| handles.push(q)),
            (_, None) => {
                summary.illegal += 1;
                continue;
            }
            (Op::Destroy { .. }, Some(i)) => arena.destroy_queue(handles[i]).map(|()| {
                handles.remove(i);
            }),
            (Op::Enqueue { value, .. }, Some(i)) => arena.enqueue_byte(handles[i], value),
            (Op::Dequeue { .. }, Some(i)) => arena.dequeue_byte(handles[i]).map(|_| ()),
        };
        match outcome {
            Ok(()) => summary.applied += 1,
            Err(err) if err.is_out_of_space() => summary.out_of_space += 1,
            Err(_) => summary.illegal += 1,
        }
    }
    summary
}
