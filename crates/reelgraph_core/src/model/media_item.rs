//! Media item domain model.
//!
//! # Responsibility
//! - Define the canonical media item record and its like-membership set.
//! - Own the wire shape of `duration` (whole minutes).
//!
//! # Invariants
//! - `id` is assigned by the media item store and never reused.
//! - `liked_by` records membership only; its size is the popularity score.

use crate::model::entity::{Entity, EntityId, EntityKind};
use crate::model::person::PersonId;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Stable identifier of a media item.
pub type MediaItemId = EntityId;

/// Canonical media item record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    /// Assigned by the store on creation; `0` before that.
    #[serde(default)]
    pub id: MediaItemId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Serialized as ISO `YYYY-MM-DD`.
    pub release_date: NaiveDate,
    /// Serialized as a signed count of whole minutes. Negative values decode
    /// so validation can reject them with a reason.
    #[serde(with = "duration_minutes")]
    pub duration: Duration,
    /// Ids of people who like this item.
    #[serde(default)]
    pub liked_by: BTreeSet<PersonId>,
}

impl MediaItem {
    /// Creates an unstored media item with no likes.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        release_date: NaiveDate,
        duration: Duration,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            description: description.into(),
            release_date,
            duration,
            liked_by: BTreeSet::new(),
        }
    }

    /// Popularity score used by ranking.
    pub fn like_count(&self) -> usize {
        self.liked_by.len()
    }
}

impl Entity for MediaItem {
    const KIND: EntityKind = EntityKind::MediaItem;

    fn id(&self) -> EntityId {
        self.id
    }

    fn assign_id(&mut self, id: EntityId) {
        self.id = id;
    }
}

mod duration_minutes {
    use chrono::Duration;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(value.num_minutes())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let minutes = i64::deserialize(deserializer)?;
        Duration::try_minutes(minutes)
            .ok_or_else(|| D::Error::custom(format!("duration of {minutes} minutes is out of range")))
    }
}

#[cfg(test)]
mod tests {
    use super::MediaItem;
    use chrono::{Duration, NaiveDate};

    #[test]
    fn new_item_starts_without_likes() {
        let date = NaiveDate::from_ymd_opt(1999, 3, 31).unwrap();
        let item = MediaItem::new("The Matrix", "", date, Duration::minutes(136));
        assert_eq!(item.id, 0);
        assert_eq!(item.like_count(), 0);
    }
}
