//! Card instance identification.
//!
//! Every physical card dealt into a game gets a unique `InstanceId`.
//! Two cards with the same rank, suit and kind are equal as values but
//! keep distinct ids, which is what the emergency action ledger keys on.
//!
//! ## Usage
//!
//! ```
//! use burnpile::core::{InstanceAllocator, InstanceId};
//!
//! let mut ids = InstanceAllocator::new();
//! let first = ids.alloc();
//! let second = ids.alloc();
//!
//! assert_eq!(first, InstanceId(0));
//! assert_ne!(first, second);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for one physical card in a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl InstanceId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for InstanceId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Instance({})", self.0)
    }
}

/// Monotonic allocator for instance ids.
///
/// Ids are never reused within a game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceAllocator {
    next: u32,
}

impl InstanceAllocator {
    /// Create an allocator starting at id 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id.
    pub fn alloc(&mut self) -> InstanceId {
        let id = InstanceId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    #[must_use]
    pub fn allocated(&self) -> u32 {
        self.next
    }
}
