//! Person domain model.
//!
//! # Responsibility
//! - Define the canonical person record and its friendship adjacency set.
//!
//! # Invariants
//! - `id` is assigned by the person store and never reused.
//! - `friends` is symmetric across the store: `a ∈ b.friends ⇔ b ∈ a.friends`.
//!   Only the friendship graph service mutates it.
//! - `name` is never empty once a record passed normalization.

use crate::model::entity::{Entity, EntityId, EntityKind};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Stable identifier of a person.
pub type PersonId = EntityId;

/// Canonical person record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Assigned by the store on creation; `0` before that.
    #[serde(default)]
    pub id: PersonId,
    pub email: String,
    pub login: String,
    /// Display name. Defaults to `login` during normalization when empty.
    #[serde(default)]
    pub name: String,
    /// Serialized as ISO `YYYY-MM-DD`.
    pub birthday: NaiveDate,
    /// Friend ids, kept sorted for deterministic output.
    #[serde(default)]
    pub friends: BTreeSet<PersonId>,
}

impl Person {
    /// Creates an unstored person with no friends.
    pub fn new(
        email: impl Into<String>,
        login: impl Into<String>,
        name: impl Into<String>,
        birthday: NaiveDate,
    ) -> Self {
        Self {
            id: 0,
            email: email.into(),
            login: login.into(),
            name: name.into(),
            birthday,
            friends: BTreeSet::new(),
        }
    }

    /// Returns whether `other` is in this person's friend set.
    pub fn is_friend_of(&self, other: PersonId) -> bool {
        self.friends.contains(&other)
    }
}

impl Entity for Person {
    const KIND: EntityKind = EntityKind::Person;

    fn id(&self) -> EntityId {
        self.id
    }

    fn assign_id(&mut self, id: EntityId) {
        self.id = id;
    }
}
