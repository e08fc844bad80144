use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::ConcurrentModification;

/// Returns an id that no other collection in this process has been given. Cursors and handles
/// record the id of the collection that created them.
pub(crate) fn next_owner_id() -> u64 {
    static NEXT_ID: AtomicU64 = AtomicU64::new(0);
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// A modification stamp for a collection. It is bumped every time the collection changes
/// structurally (any insertion or removal, or a reallocation), and detached cursors compare the
/// value they recorded against the current value before every step.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Generation(u64);

impl Generation {
    pub const fn new() -> Generation {
        Generation(0)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    /// Marks a structural modification. Wrapping after 2^64 modifications is accepted.
    pub const fn bump(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }

    /// Checks that `recorded` is still the current generation.
    pub const fn check(self, recorded: Generation) -> Result<(), ConcurrentModification> {
        if self.0 == recorded.0 {
            Ok(())
        } else {
            Err(ConcurrentModification {
                expected: recorded.0,
                found: self.0,
            })
        }
    }
}
