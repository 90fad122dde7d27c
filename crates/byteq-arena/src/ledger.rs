//! Free-space ledger: a running count of uncommitted arena bytes.
//!
//! The counter lives in bytes 1–2 of the arena as a big-endian `u16`. It is
//! updated incrementally by every operation that commits or releases bytes,
//! so capacity checks never rescan the header table.

use crate::layout::{Arena, LEDGER_OFFSET};

impl Arena {
    /// Bytes not committed to any queue header or segment.
    pub(crate) fn free_space(&self) -> usize {
        self.read_u16(LEDGER_OFFSET) as usize
    }

    /// Apply a signed change to the ledger.
    ///
    /// Callers must have checked `free_space() >= -delta` before committing.
    /// An out-of-range result is a broken caller and panics.
    pub(crate) fn adjust_free_space(&mut self, delta: isize) {
        let current = self.free_space();
        let next = current
            .checked_add_signed(delta)
            .filter(|&next| next <= self.capacity());
        match next {
            Some(next) => self.reset_free_space(next),
            None => panic!("ledger out of range: {current} {delta:+}"),
        }
    }

    /// Overwrite the ledger with an absolute count.
    pub(crate) fn reset_free_space(&mut self, count: usize) {
        debug_assert!(count <= u16::MAX as usize);
        self.write_u16(LEDGER_OFFSET, count as u16);
    }
}

#[cfg(test)]
mod tests {
    use crate::layout::Arena;

    #[test]
    fn adjust_moves_both_directions() {
        let mut arena = Arena::new(2048);
        arena.adjust_free_space(-5);
        assert_eq!(arena.free_space(), 2040);
        arena.adjust_free_space(3);
        assert_eq!(arena.free_space(), 2043);
    }

    #[test]
    #[should_panic(expected = "ledger out of range")]
    fn adjust_below_zero_panics() {
        let mut arena = Arena::new(16);
        arena.adjust_free_space(-14);
    }

    #[test]
    #[should_panic(expected = "ledger out of range")]
    fn adjust_above_capacity_panics() {
        let mut arena = Arena::new(16);
        arena.adjust_free_space(17);
    }

    #[test]
    fn reset_overwrites() {
        let mut arena = Arena::new(2048);
        arena.reset_free_space(17);
        assert_eq!(arena.free_space(), 17);
    }

    #[test]
    fn stored_big_endian_after_prelude_counter() {
        let arena = Arena::new(4096);
        // 4093 = 0x0FFD
        assert_eq!(arena.byte(1), 0x0F);
        assert_eq!(arena.byte(2), 0xFD);
        assert_eq!(arena.byte(0), 0);
    }
}
