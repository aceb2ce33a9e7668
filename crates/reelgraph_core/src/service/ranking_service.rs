//! Like-membership and popularity ranking over the media item store.
//!
//! # Responsibility
//! - Record and withdraw likes (`MediaItem::liked_by`).
//! - Produce top-N popularity rankings.
//!
//! # Invariants
//! - Ranking order: like count descending, then id ascending.
//! - A like is recorded only for a person id present at the time of the like.
//! - Repeated likes and unlikes of an absent like are successful no-ops.

use crate::model::entity::EntityKind;
use crate::model::media_item::{MediaItem, MediaItemId};
use crate::model::person::{Person, PersonId};
use crate::repo::entity_store::EntityStore;
use crate::repo::error::{RepoError, RepoResult};
use log::info;
use std::cmp::Reverse;

/// Ranking size used when a caller does not supply one.
pub const DEFAULT_POPULAR_COUNT: i64 = 10;

/// Ranking service borrowing the item store and the person store.
pub struct RankingService<'s, M, P>
where
    M: EntityStore<MediaItem>,
    P: EntityStore<Person>,
{
    items: &'s M,
    people: &'s P,
}

impl<'s, M, P> RankingService<'s, M, P>
where
    M: EntityStore<MediaItem>,
    P: EntityStore<Person>,
{
    pub fn new(items: &'s M, people: &'s P) -> Self {
        Self { items, people }
    }

    /// Records that `person_id` likes `item_id`.
    pub fn like(&self, item_id: MediaItemId, person_id: PersonId) -> RepoResult<()> {
        self.ensure_pair(item_id, person_id)?;
        self.items.update_with(item_id, |item| {
            item.liked_by.insert(person_id);
        })?;
        info!("event=like_add module=ranking status=ok item={item_id} person={person_id}");
        Ok(())
    }

    /// Withdraws a like. Succeeds when the like was never recorded.
    pub fn unlike(&self, item_id: MediaItemId, person_id: PersonId) -> RepoResult<()> {
        self.ensure_pair(item_id, person_id)?;
        self.items.update_with(item_id, |item| {
            item.liked_by.remove(&person_id);
        })?;
        info!("event=like_remove module=ranking status=ok item={item_id} person={person_id}");
        Ok(())
    }

    /// Returns up to `count` items ordered by popularity.
    ///
    /// `count <= 0` yields an empty list.
    pub fn top_popular(&self, count: i64) -> Vec<MediaItem> {
        let Ok(limit) = usize::try_from(count) else {
            return Vec::new();
        };
        if limit == 0 {
            return Vec::new();
        }

        let mut items = self.items.list();
        items.sort_by_key(|item| (Reverse(item.like_count()), item.id));
        items.truncate(limit);
        items
    }

    fn ensure_pair(&self, item_id: MediaItemId, person_id: PersonId) -> RepoResult<()> {
        if !self.items.contains(item_id) {
            return Err(RepoError::not_found(EntityKind::MediaItem, item_id));
        }
        if !self.people.contains(person_id) {
            return Err(RepoError::not_found(EntityKind::Person, person_id));
        }
        Ok(())
    }
}
