//! The backing byte buffer and its address conventions.
//!
//! Every queue shares one contiguous [`Arena`], laid out low-to-high as:
//!
//! ```text
//! 0        1          3                      header_length()      capacity-1
//! ┌───────┬──────────┬───────────────────────┬─────────────┬──────────────────┐
//! │ count │ ledger   │ header table          │ mid space   │ storage area     │
//! │ (u8)  │ (u16 BE) │ 4 bytes × queue count │ (free)      │ q_n … q_2  q_1   │
//! └───────┴──────────┴───────────────────────┴─────────────┴──────────────────┘
//! ```
//!
//! Segments are packed against the high edge: queue #1 owns the highest
//! addresses and every later queue sits just below its predecessor. The
//! header table grows upward and the storage area grows downward into the
//! shared mid space between them.

use std::ops::RangeInclusive;

use crate::descriptor::HEADER_LEN;

/// Offset of the queue counter.
pub(crate) const COUNT_OFFSET: usize = 0;

/// Offset of the big-endian free-space ledger.
pub(crate) const LEDGER_OFFSET: usize = 1;

/// Bytes reserved ahead of the header table (counter + ledger).
pub const PRELUDE_LEN: usize = 3;

/// The fixed-size byte buffer backing all queues.
///
/// Allocated once at construction and never resized. All reads and writes go
/// through the indexing helpers below, so an out-of-range address panics
/// instead of touching foreign memory.
pub(crate) struct Arena {
    data: Box<[u8]>,
}

impl Arena {
    /// Create a zeroed arena with an empty header table and a full ledger.
    pub(crate) fn new(capacity: usize) -> Self {
        let mut arena = Self {
            data: vec![0u8; capacity].into_boxed_slice(),
        };
        arena.reset_free_space(capacity - PRELUDE_LEN);
        arena
    }

    /// Total size in bytes.
    pub(crate) fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Highest address in the arena, where queue #1 is anchored.
    pub(crate) fn top(&self) -> usize {
        self.data.len() - 1
    }

    pub(crate) fn queue_count(&self) -> usize {
        self.data[COUNT_OFFSET] as usize
    }

    pub(crate) fn set_queue_count(&mut self, count: usize) {
        debug_assert!(count <= u8::MAX as usize);
        self.data[COUNT_OFFSET] = count as u8;
    }

    /// First address past the header table: the low bound of usable storage.
    pub(crate) fn header_length(&self) -> usize {
        PRELUDE_LEN + HEADER_LEN * self.queue_count()
    }

    /// Lowest committed storage address (the newest queue's `back`).
    ///
    /// Equals the capacity when no queue exists, so that
    /// [`mid_space`](Self::mid_space) covers the whole storage area.
    pub(crate) fn storage_back(&self) -> usize {
        match self.queue_count() {
            0 => self.capacity(),
            n => self.descriptor(n).back(),
        }
    }

    /// Unowned bytes between the header table and the storage area.
    pub(crate) fn mid_space(&self) -> usize {
        self.storage_back() - self.header_length()
    }

    pub(crate) fn byte(&self, addr: usize) -> u8 {
        self.data[addr]
    }

    pub(crate) fn set_byte(&mut self, addr: usize, value: u8) {
        debug_assert!(addr >= self.header_length(), "write at {addr} hits header table");
        self.data[addr] = value;
    }

    /// Move the bytes in `src` so they start at `dest`. Overlap is allowed.
    pub(crate) fn move_bytes(&mut self, src: RangeInclusive<usize>, dest: usize) {
        self.data.copy_within(src, dest);
    }

    pub(crate) fn read_u16(&self, offset: usize) -> u16 {
        u16::from_be_bytes([self.data[offset], self.data[offset + 1]])
    }

    pub(crate) fn write_u16(&mut self, offset: usize, value: u16) {
        self.data[offset..offset + 2].copy_from_slice(&value.to_be_bytes());
    }

    pub(crate) fn read_u32(&self, offset: usize) -> u32 {
        let mut word = [0u8; 4];
        word.copy_from_slice(&self.data[offset..offset + 4]);
        u32::from_be_bytes(word)
    }

    pub(crate) fn write_u32(&mut self, offset: usize, value: u32) {
        self.data[offset..offset + 4].copy_from_slice(&value.to_be_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_arena_is_empty_with_full_ledger() {
        let arena = Arena::new(2048);
        assert_eq!(arena.capacity(), 2048);
        assert_eq!(arena.queue_count(), 0);
        assert_eq!(arena.free_space(), 2045);
        assert_eq!(arena.header_length(), PRELUDE_LEN);
    }

    #[test]
    fn empty_arena_storage_back_is_capacity() {
        let arena = Arena::new(64);
        assert_eq!(arena.storage_back(), 64);
        assert_eq!(arena.mid_space(), 61);
        assert_eq!(arena.top(), 63);
    }

    #[test]
    fn header_length_tracks_queue_count() {
        let mut arena = Arena::new(64);
        arena.set_queue_count(3);
        assert_eq!(arena.header_length(), 15);
    }

    #[test]
    fn integers_are_big_endian() {
        let mut arena = Arena::new(64);
        arena.write_u16(10, 0x1234);
        assert_eq!(arena.byte(10), 0x12);
        assert_eq!(arena.byte(11), 0x34);
        arena.write_u32(20, 0xA1B2_C3D4);
        assert_eq!(arena.byte(20), 0xA1);
        assert_eq!(arena.read_u32(20), 0xA1B2_C3D4);
    }

    #[test]
    fn move_bytes_handles_overlap() {
        let mut arena = Arena::new(64);
        for (i, addr) in (40..45).enumerate() {
            arena.set_byte(addr, i as u8 + 1);
        }
        arena.move_bytes(40..=44, 42);
        let moved: Vec<u8> = (42..47).map(|a| arena.byte(a)).collect();
        assert_eq!(moved, vec![1, 2, 3, 4, 5]);
    }
}
