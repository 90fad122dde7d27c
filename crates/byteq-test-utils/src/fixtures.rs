//! Reusable operation sequences.
//!
//! - [`scripted_ops`]: the two-queue interleaving used as the canonical demo.
//! - [`seeded_ops`]: deterministic random churn drawn from a [`WorkloadMix`].
//!
//! Operations address queues by `slot`, which callers reduce modulo the number
//! of live queues. A sequence therefore stays meaningful however many creates
//! and destroys succeed along the way.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// One arena operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Create,
    Destroy { slot: usize },
    Enqueue { slot: usize, value: u8 },
    Dequeue { slot: usize },
}

impl Op {
    /// Target queue index for `live` queues, or `None` for creates and when
    /// no queue exists.
    pub fn target(&self, live: usize) -> Option<usize> {
        let slot = match *self {
            Op::Create => return None,
            Op::Destroy { slot } | Op::Enqueue { slot, .. } | Op::Dequeue { slot } => slot,
        };
        (live > 0).then(|| slot % live)
    }
}

/// Relative weights of each operation kind in a seeded workload.
#[derive(Clone, Copy, Debug)]
pub struct WorkloadMix {
    pub create: u32,
    pub destroy: u32,
    pub enqueue: u32,
    pub dequeue: u32,
}

impl WorkloadMix {
    /// Mostly traffic with occasional churn; queues grow over time.
    pub const GROWTH: Self = Self {
        create: 3,
        destroy: 1,
        enqueue: 70,
        dequeue: 26,
    };

    /// Heavy create/destroy churn to stress placement and slack reuse.
    pub const CHURN: Self = Self {
        create: 15,
        destroy: 12,
        enqueue: 45,
        dequeue: 28,
    };

    /// Enqueue-dominated; drives the arena to exhaustion.
    pub const FILL: Self = Self {
        create: 2,
        destroy: 0,
        enqueue: 97,
        dequeue: 1,
    };

    fn total(&self) -> u32 {
        self.create + self.destroy + self.enqueue + self.dequeue
    }
}

/// Deterministic pseudo-random operation sequence.
pub fn seeded_ops(seed: u64, count: usize, mix: WorkloadMix) -> Vec<Op> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let total = mix.total().max(1);
    (0..count)
        .map(|_| {
            let roll = rng.gen_range(0..total);
            let slot = rng.gen_range(0..64usize);
            if roll < mix.create {
                Op::Create
            } else if roll < mix.create + mix.destroy {
                Op::Destroy { slot }
            } else if roll < mix.create + mix.destroy + mix.enqueue {
                Op::Enqueue {
                    slot,
                    value: rng.gen(),
                }
            } else {
                Op::Dequeue { slot }
            }
        })
        .collect()
}

/// Two queues with interleaved traffic; draining queue 0 yields `0, 1, 2`.
pub fn scripted_ops() -> Vec<Op> {
    vec![
        Op::Create,
        Op::Enqueue { slot: 0, value: 0 },
        Op::Enqueue { slot: 0, value: 1 },
        Op::Create,
        Op::Enqueue { slot: 1, value: 3 },
        Op::Enqueue { slot: 0, value: 2 },
        Op::Enqueue { slot: 1, value: 4 },
        Op::Dequeue { slot: 0 },
        Op::Dequeue { slot: 0 },
    ]
}
