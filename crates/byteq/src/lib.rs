//! byteq: many byte FIFO queues packed into one fixed-size arena.
//!
//! This is the top-level facade crate that re-exports the public API of
//! `byteq-arena`. For most users, adding `byteq` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use byteq::prelude::*;
//!
//! let mut arena = QueueArena::new(ArenaConfig::new(256)).unwrap();
//! let inbox = arena.create_queue().unwrap();
//! let outbox = arena.create_queue().unwrap();
//!
//! arena.enqueue_byte(inbox, b'h').unwrap();
//! arena.enqueue_byte(outbox, b'!').unwrap();
//! arena.enqueue_byte(inbox, b'i').unwrap();
//!
//! assert_eq!(arena.dequeue_byte(inbox), Ok(b'h'));
//! assert_eq!(arena.dequeue_byte(inbox), Ok(b'i'));
//! assert!(matches!(
//!     arena.dequeue_byte(inbox),
//!     Err(ArenaError::IllegalOperation { .. })
//! ));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`arena`] | `byteq-arena` | `QueueArena`, descriptors, config, errors, validation |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Queue arena, descriptors, and compaction (`byteq-arena`).
///
/// Most users only need [`arena::QueueArena`] and [`arena::QueueHandle`]
/// from this module; they are also available in the [`prelude`].
pub use byteq_arena as arena;

/// Common imports for typical byteq usage.
///
/// ```rust
/// use byteq::prelude::*;
/// ```
pub mod prelude {
    // Arena
    pub use byteq_arena::{QueueArena, QueueHandle, SharedQueueArena};

    // Configuration
    pub use byteq_arena::{ArenaConfig, ConfigError};

    // Errors
    pub use byteq_arena::{ArenaError, IllegalReason};
}
