//! Fixed-capacity compacting byte arena hosting many FIFO queues.
//!
//! One contiguous byte buffer holds a small prelude, a packed header table,
//! and the byte segments of up to 64 independent queues. Nothing is
//! allocated after construction: queues grow into shared free space and the
//! arena slides segments in place when a queue is boxed in by its neighbour.
//!
//! # Architecture
//!
//! ```text
//! QueueArena (public API, handle index, compaction counters)
//! ├── lifecycle   create_queue / destroy_queue
//! ├── fifo        enqueue_byte / dequeue_byte / peek_byte
//! ├── compaction  placement, shift_right, shift_left, buffer_space
//! └── Arena (Box<[u8]>)
//!     ├── layout      prelude, header length, mid space, byte access
//!     ├── descriptor  12/12/6/1-bit packed queue headers
//!     └── ledger      16-bit big-endian free-space counter
//! ```
//!
//! # Example
//!
//! ```rust
//! use byteq_arena::QueueArena;
//!
//! let mut arena = QueueArena::with_defaults();
//! let q = arena.create_queue().unwrap();
//! arena.enqueue_byte(q, 7).unwrap();
//! arena.enqueue_byte(q, 8).unwrap();
//! assert_eq!(arena.dequeue_byte(q), Ok(7));
//! assert_eq!(arena.dequeue_byte(q), Ok(8));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
mod compaction;
pub mod config;
pub mod descriptor;
pub mod error;
mod fifo;
pub mod handle;
pub mod invariants;
mod layout;
mod ledger;
mod lifecycle;
pub mod shared;
pub mod stats;

// Public re-exports for the primary API surface.
pub use arena::QueueArena;
pub use config::{ArenaConfig, ConfigError};
pub use descriptor::QueueDescriptor;
pub use error::{ArenaError, IllegalReason};
pub use handle::QueueHandle;
pub use invariants::InvariantViolation;
pub use layout::PRELUDE_LEN;
pub use shared::SharedQueueArena;
pub use stats::CompactionStats;
