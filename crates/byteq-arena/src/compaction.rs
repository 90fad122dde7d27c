//! In-place segment relocation.
//!
//! Slack accumulates between segments as queues shrink or are destroyed and
//! as new queues are placed with a head start. Two passes move it around:
//!
//! - [`shift_right`](Arena::shift_right) squeezes every segment against the
//!   high edge, turning all slack into one mid-space gap.
//! - [`shift_left`](Arena::shift_left) lowers the segments of every queue
//!   newer than a starved one, opening room just below its `back`.
//!
//! Neither pass changes a segment's length or the relative order of queues.
//! Both leave neighbour bounds stale while they run, so they must finish
//! before any other arena operation observes the table.

use tracing::debug;

use crate::config::QUEUE_RESERVATION;
use crate::descriptor::HEADER_LEN;
use crate::layout::Arena;
use crate::stats::CompactionStats;

impl Arena {
    /// Head start granted to a new or starved queue.
    ///
    /// The smaller of an even split of the mid space across live queues and a
    /// split weighted by how full the queue table is, so grants shrink both as
    /// storage fills and as more queues compete for it.
    pub(crate) fn buffer_space(&self, max_queues: usize) -> usize {
        let count = self.queue_count();
        if count == 0 {
            return 0;
        }
        let mid = self.mid_space();
        let even = mid / count;
        let weighted = mid * count / max_queues;
        even.min(weighted)
    }

    /// Choose the placeholder slot for the next queue to be created.
    ///
    /// Requires `free_space() >= QUEUE_RESERVATION`. May run
    /// [`shift_right`](Self::shift_right) when the mid space is too small.
    pub(crate) fn new_queue_slot(&mut self, max_queues: usize, stats: &mut CompactionStats) -> usize {
        if self.queue_count() == 0 {
            return self.top();
        }
        let mid = self.mid_space();
        if mid >= QUEUE_RESERVATION {
            // Keep HEADER_LEN bytes free for the new table entry.
            let buffer = self.buffer_space(max_queues).clamp(1, mid - HEADER_LEN);
            return self.storage_back() - buffer;
        }
        self.shift_right(stats);
        debug_assert!(self.mid_space() >= QUEUE_RESERVATION);
        self.storage_back() - 1
    }

    /// Pack every segment against the high edge, oldest queue first.
    ///
    /// Afterwards `mid_space() == free_space()`.
    pub(crate) fn shift_right(&mut self, stats: &mut CompactionStats) {
        let mut ceiling = self.top();
        let mut moved = 0usize;
        for id in 1..=self.queue_count() {
            let mut desc = self.descriptor(id);
            let gap = ceiling - desc.front();
            if gap > 0 {
                self.move_bytes(desc.back()..=desc.front(), desc.back() + gap);
                desc.translate(gap as isize);
                self.set_descriptor(desc);
                moved += desc.footprint();
            }
            ceiling = desc.back() - 1;
        }
        stats.shift_right_runs += 1;
        stats.bytes_moved += moved as u64;
        debug!(moved, mid_space = self.mid_space(), "shift_right packed storage");
    }

    /// Give queue `from_id` room below its `back` by lowering every newer
    /// segment into the mid space. Queue `from_id` itself does not move.
    ///
    /// Requires a non-empty mid space.
    pub(crate) fn shift_left(&mut self, from_id: usize, max_queues: usize, stats: &mut CompactionStats) {
        let mid = self.mid_space();
        if mid == 0 {
            return;
        }
        let amount = self.buffer_space(max_queues).clamp(1, mid);
        let mut moved = 0usize;
        for id in (from_id + 1..=self.queue_count()).rev() {
            let mut desc = self.descriptor(id);
            self.move_bytes(desc.back()..=desc.front(), desc.back() - amount);
            desc.translate(-(amount as isize));
            self.set_descriptor(desc);
            moved += desc.footprint();
        }
        stats.shift_left_runs += 1;
        stats.bytes_moved += moved as u64;
        debug!(from_id, amount, moved, "shift_left donated slack");
    }
}
