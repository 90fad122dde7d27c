//! Structural self-check for a [`QueueArena`].

use std::error::Error;
use std::fmt;

use crate::arena::QueueArena;
use crate::descriptor::HEADER_LEN;
use crate::layout::PRELUDE_LEN;

/// The first broken invariant found by [`QueueArena::validate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The header counter disagrees with the number of live handles, or
    /// exceeds the queue limit.
    CountMismatch {
        /// Count stored in the arena prelude.
        stored: usize,
        /// Live handles known to the arena.
        handles: usize,
    },
    /// A descriptor's identifier does not match its table slot.
    IdMismatch {
        /// Expected identifier (slot + 1).
        slot_id: usize,
        /// Identifier stored in the descriptor.
        stored: usize,
    },
    /// A segment lies outside the storage area or has `back > front`.
    SegmentOutOfBounds {
        /// Queue identifier.
        id: usize,
        /// Stored `front`.
        front: usize,
        /// Stored `back`.
        back: usize,
    },
    /// A segment reaches into the segment of the next older queue.
    Overlap {
        /// The newer of the two queues.
        id: usize,
    },
    /// The ledger disagrees with the committed bytes.
    LedgerMismatch {
        /// Value held by the ledger.
        recorded: usize,
        /// Value implied by the header table.
        expected: usize,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CountMismatch { stored, handles } => {
                write!(f, "queue count {stored} does not match {handles} live handles")
            }
            Self::IdMismatch { slot_id, stored } => {
                write!(f, "header slot {slot_id} holds id {stored}")
            }
            Self::SegmentOutOfBounds { id, front, back } => {
                write!(f, "queue {id} segment [{back}, {front}] out of bounds")
            }
            Self::Overlap { id } => write!(f, "queue {id} overlaps queue {}", id - 1),
            Self::LedgerMismatch { recorded, expected } => {
                write!(f, "ledger records {recorded} free bytes, expected {expected}")
            }
        }
    }
}

impl Error for InvariantViolation {}

impl QueueArena {
    /// Check every structural invariant of the arena.
    ///
    /// Walks the header table once: identifiers are dense, each segment has
    /// `back <= front` and sits between the header table and the top edge,
    /// each newer segment lies strictly below the older one, and the ledger
    /// equals the capacity minus the prelude, headers, and segment
    /// footprints.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let stored = self.arena.queue_count();
        if stored != self.handles.len() || stored > self.max_queues() {
            return Err(InvariantViolation::CountMismatch {
                stored,
                handles: self.handles.len(),
            });
        }

        let header_length = self.arena.header_length();
        let mut ceiling = self.arena.top();
        let mut committed = 0usize;
        for slot_id in 1..=stored {
            let desc = self.arena.descriptor(slot_id);
            if desc.id() != slot_id {
                return Err(InvariantViolation::IdMismatch {
                    slot_id,
                    stored: desc.id(),
                });
            }
            let (front, back) = (desc.front(), desc.back());
            if back > front || back < header_length || front > self.arena.top() {
                return Err(InvariantViolation::SegmentOutOfBounds {
                    id: slot_id,
                    front,
                    back,
                });
            }
            if front > ceiling {
                return Err(InvariantViolation::Overlap { id: slot_id });
            }
            ceiling = back.saturating_sub(1);
            committed += HEADER_LEN + desc.footprint();
        }

        let expected = self.arena.capacity() - PRELUDE_LEN - committed;
        let recorded = self.arena.free_space();
        if recorded != expected {
            return Err(InvariantViolation::LedgerMismatch { recorded, expected });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_and_busy_arenas_validate() {
        let mut arena = QueueArena::with_defaults();
        assert_eq!(arena.validate(), Ok(()));
        let q0 = arena.create_queue().unwrap();
        let q1 = arena.create_queue().unwrap();
        for b in 0..100 {
            arena.enqueue_byte(q0, b).unwrap();
            arena.enqueue_byte(q1, b).unwrap();
        }
        assert_eq!(arena.validate(), Ok(()));
        arena.destroy_queue(q0).unwrap();
        assert_eq!(arena.validate(), Ok(()));
    }

    #[test]
    fn corrupted_ledger_is_reported() {
        let mut arena = QueueArena::with_defaults();
        let _q = arena.create_queue().unwrap();
        arena.arena.reset_free_space(7);
        assert_eq!(
            arena.validate(),
            Err(InvariantViolation::LedgerMismatch {
                recorded: 7,
                expected: 2040
            })
        );
    }

    #[test]
    fn overlapping_segments_are_reported() {
        let mut arena = QueueArena::with_defaults();
        let _q0 = arena.create_queue().unwrap();
        let q1 = arena.create_queue().unwrap();
        let mut desc = arena.descriptor(q1).unwrap();
        desc.set_bounds(2047, 2047);
        arena.arena.set_descriptor(desc);
        assert_eq!(arena.validate(), Err(InvariantViolation::Overlap { id: 2 }));
    }

    #[test]
    fn display_is_readable() {
        let msg = InvariantViolation::Overlap { id: 3 }.to_string();
        assert_eq!(msg, "queue 3 overlaps queue 2");
    }
}
