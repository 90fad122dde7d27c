//! Queue descriptors and the header table that stores them.
//!
//! Each live queue has one 4-byte [`QueueDescriptor`] in the header table,
//! which starts right after the arena prelude and is ordered by ascending
//! identifier. Identifiers are dense: queue `k` always lives at table slot
//! `k - 1`, so destroying a queue shifts every later entry down one slot.

use std::fmt;

use crate::layout::{Arena, PRELUDE_LEN};

/// Size of one header table entry in bytes.
pub const HEADER_LEN: usize = 4;

/// A bit-packed queue descriptor.
///
/// Stored big-endian in the header table with this layout:
///
/// ```text
///  31   30     29..24     23..12    11..0
/// ┌────┬──────┬──────────┬─────────┬─────────┐
/// │ -- │empty │ id - 1   │ back    │ front   │
/// └────┴──────┴──────────┴─────────┴─────────┘
/// ```
///
/// The segment owned by the queue is `[back, front]` inclusive. `front` holds
/// the oldest byte and stays put under ordinary traffic; `back` moves down on
/// enqueue and up on dequeue. An empty queue keeps `back == front` as a
/// reserved placeholder slot.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueueDescriptor(u32);

impl QueueDescriptor {
    const INDEX_MASK: u32 = (1 << 12) - 1;
    const BACK_SHIFT: u32 = 12;
    const ID_SHIFT: u32 = 24;
    const ID_MASK: u32 = (1 << 6) - 1;
    const EMPTY_BIT: u32 = 1 << 30;

    /// A fresh, empty descriptor whose placeholder slot is `slot`.
    pub(crate) fn new_empty(id: usize, slot: usize) -> Self {
        let mut desc = Self(Self::EMPTY_BIT);
        desc.set_id(id);
        desc.set_bounds(slot, slot);
        desc
    }

    /// Reinterpret a raw header word.
    pub fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// The raw header word as stored in the arena.
    pub fn to_bits(self) -> u32 {
        self.0
    }

    /// Address of the oldest byte (the segment's high bound).
    pub fn front(&self) -> usize {
        (self.0 & Self::INDEX_MASK) as usize
    }

    /// Address of the newest byte (the segment's low bound).
    pub fn back(&self) -> usize {
        ((self.0 >> Self::BACK_SHIFT) & Self::INDEX_MASK) as usize
    }

    /// Dense 1-based identifier; equals the queue's table slot plus one.
    pub fn id(&self) -> usize {
        ((self.0 >> Self::ID_SHIFT) & Self::ID_MASK) as usize + 1
    }

    /// Whether the queue currently holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.0 & Self::EMPTY_BIT != 0
    }

    /// Number of bytes queued.
    pub fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.footprint()
        }
    }

    /// Bytes of storage the segment occupies, including an empty queue's
    /// placeholder slot.
    pub fn footprint(&self) -> usize {
        self.front() - self.back() + 1
    }

    pub(crate) fn set_bounds(&mut self, front: usize, back: usize) {
        debug_assert!(back <= front, "back {back} above front {front}");
        debug_assert!(front as u32 <= Self::INDEX_MASK);
        let cleared = self.0 & !(Self::INDEX_MASK | (Self::INDEX_MASK << Self::BACK_SHIFT));
        self.0 = cleared | front as u32 | ((back as u32) << Self::BACK_SHIFT);
    }

    pub(crate) fn set_id(&mut self, id: usize) {
        debug_assert!((1..=64).contains(&id), "queue id {id} out of range");
        let cleared = self.0 & !(Self::ID_MASK << Self::ID_SHIFT);
        self.0 = cleared | (((id - 1) as u32 & Self::ID_MASK) << Self::ID_SHIFT);
    }

    pub(crate) fn set_empty(&mut self, empty: bool) {
        if empty {
            self.0 |= Self::EMPTY_BIT;
        } else {
            self.0 &= !Self::EMPTY_BIT;
        }
    }

    /// Translate the whole segment by `delta` bytes (negative moves down).
    pub(crate) fn translate(&mut self, delta: isize) {
        let front = (self.front() as isize + delta) as usize;
        let back = (self.back() as isize + delta) as usize;
        self.set_bounds(front, back);
    }
}

impl fmt::Debug for QueueDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueueDescriptor")
            .field("id", &self.id())
            .field("front", &self.front())
            .field("back", &self.back())
            .field("is_empty", &self.is_empty())
            .finish()
    }
}

impl fmt::Display for QueueDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Q#{}[{}..={}, len={}]",
            self.id(),
            self.back(),
            self.front(),
            self.len()
        )
    }
}

impl Arena {
    /// Byte offset of queue `id`'s header table entry.
    pub(crate) fn header_offset(id: usize) -> usize {
        debug_assert!(id >= 1);
        PRELUDE_LEN + HEADER_LEN * (id - 1)
    }

    pub(crate) fn descriptor(&self, id: usize) -> QueueDescriptor {
        debug_assert!(id >= 1 && id <= self.queue_count(), "queue {id} not live");
        QueueDescriptor::from_bits(self.read_u32(Self::header_offset(id)))
    }

    pub(crate) fn set_descriptor(&mut self, desc: QueueDescriptor) {
        self.write_u32(Self::header_offset(desc.id()), desc.to_bits());
    }

    /// Drop entry `id` from the table, shifting every later entry down one
    /// slot and renumbering it. The vacated last slot is zeroed.
    ///
    /// The queue counter is left to the caller.
    pub(crate) fn remove_descriptor(&mut self, id: usize) {
        let count = self.queue_count();
        for later in id + 1..=count {
            let mut desc = self.descriptor(later);
            desc.set_id(later - 1);
            self.set_descriptor(desc);
        }
        self.write_u32(Self::header_offset(count), 0);
    }
}
