//! Compaction counters.

/// Running totals of compaction work performed by an arena.
///
/// Counters only grow; [`QueueArena::reset_stats`](crate::QueueArena::reset_stats)
/// zeroes them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompactionStats {
    /// Full defragmentations toward the high edge.
    pub shift_right_runs: u64,
    /// Slack donations to a starved queue.
    pub shift_left_runs: u64,
    /// Total bytes relocated by either kind of pass.
    pub bytes_moved: u64,
}

impl CompactionStats {
    /// Total compaction passes of either kind.
    pub fn total_runs(&self) -> u64 {
        self.shift_right_runs + self.shift_left_runs
    }
}
