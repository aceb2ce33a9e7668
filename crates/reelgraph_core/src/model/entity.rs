//! Identity contract shared by all stored entity kinds.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Store-assigned identifier. `0` marks a record that has not been stored yet.
pub type EntityId = u64;

/// Entity kind tag carried by not-found failures and log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Person,
    MediaItem,
}

impl EntityKind {
    /// Stable lowercase name used in messages and log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::MediaItem => "media_item",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record that can live in an `EntityStore`.
///
/// # Invariants
/// - `id()` is stable once the store has assigned it.
/// - `assign_id` is only called by the store while adding a record.
pub trait Entity: Clone + Send + Sync {
    const KIND: EntityKind;

    fn id(&self) -> EntityId;

    fn assign_id(&mut self, id: EntityId);
}
