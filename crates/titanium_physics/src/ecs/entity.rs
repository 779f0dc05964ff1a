//! Entity implementation

use std::fmt;

/// Entity identifier
///
/// Ids are assigned monotonically starting at 1 and are never reused within
/// one [`World`](super::World). Id 0 is reserved for [`Entity::INVALID`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity {
    id: u32,
}

impl Entity {
    /// Sentinel returned by operations that could not produce an entity
    pub const INVALID: Self = Self { id: 0 };

    /// Create a new entity with the given ID
    pub(super) const fn new(id: u32) -> Self {
        Self { id }
    }

    /// Get the entity ID
    pub const fn id(&self) -> u32 {
        self.id
    }

    /// Whether this handle is anything other than the sentinel
    pub const fn is_valid(&self) -> bool {
        self.id != 0
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.id)
    }
}
