//! Application facade over people, media items and their relations.
//!
//! # Responsibility
//! - Provide every operation the transport layer may call.
//! - Validate writes, then delegate to stores and relation services.
//! - Surface exactly two failure kinds: validation and not-found.
//!
//! # Invariants
//! - A rejected candidate never reaches a store.
//! - New people start without friends; updates keep the stored friend set,
//!   so the friendship relation stays symmetric.
//! - Media item `liked_by` sets only reference stored people.
//! - Removal does not cascade into `friends` or `liked_by` of other records.

use crate::model::entity::{EntityId, EntityKind};
use crate::model::media_item::{MediaItem, MediaItemId};
use crate::model::person::{Person, PersonId};
use crate::repo::entity_store::{EntityStore, InMemoryStore};
use crate::repo::error::{RepoError, RepoResult};
use crate::service::friendship_service::FriendshipService;
use crate::service::ranking_service::RankingService;
use crate::validation::{self, ValidationError};
use chrono::NaiveDate;
use log::{info, warn};

/// Facade composing the person store, the media item store and the
/// friendship/ranking services.
///
/// Safe to share across threads; every method takes `&self`.
pub struct CatalogService<P = InMemoryStore<Person>, M = InMemoryStore<MediaItem>>
where
    P: EntityStore<Person>,
    M: EntityStore<MediaItem>,
{
    people: P,
    items: M,
    today: fn() -> NaiveDate,
}

impl CatalogService {
    /// Creates a facade backed by empty in-memory stores.
    pub fn new() -> Self {
        Self::with_stores(InMemoryStore::new(), InMemoryStore::new())
    }
}

impl Default for CatalogService {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, M> CatalogService<P, M>
where
    P: EntityStore<Person>,
    M: EntityStore<MediaItem>,
{
    /// Creates a facade over caller-provided stores.
    pub fn with_stores(people: P, items: M) -> Self {
        Self {
            people,
            items,
            today: validation::today,
        }
    }

    /// Replaces the date source used for birthday validation.
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    fn graph(&self) -> FriendshipService<'_, P> {
        FriendshipService::new(&self.people)
    }

    fn ranking(&self) -> RankingService<'_, M, P> {
        RankingService::new(&self.items, &self.people)
    }

    // --- people ---

    /// Validates and stores a new person. Any supplied friend set is dropped.
    pub fn add_person(&self, candidate: Person) -> RepoResult<Person> {
        let mut accepted = validation::accept_person_at(candidate, (self.today)())
            .map_err(|err| rejected("person_add", err))?;
        accepted.friends.clear();

        let stored = self.people.add(accepted);
        info!("event=person_add module=service status=ok id={}", stored.id);
        Ok(stored)
    }

    /// Replaces a stored person's fields, keeping its current friend set.
    pub fn update_person(&self, candidate: Person) -> RepoResult<Person> {
        let mut accepted = validation::accept_person_at(candidate, (self.today)())
            .map_err(|err| rejected("person_update", err))?;
        let id = accepted.id;

        let stored = self.people.update_with(id, move |stored| {
            accepted.friends = std::mem::take(&mut stored.friends);
            *stored = accepted;
            stored.clone()
        })?;
        info!("event=person_update module=service status=ok id={id}");
        Ok(stored)
    }

    pub fn get_person(&self, id: PersonId) -> RepoResult<Person> {
        self.people.get(id)
    }

    pub fn list_people(&self) -> Vec<Person> {
        self.people.list()
    }

    /// Removes a person. Friend and like references to it are left in place.
    pub fn remove_person(&self, id: PersonId) -> RepoResult<()> {
        self.people.remove(id)?;
        info!("event=person_remove module=service status=ok id={id}");
        Ok(())
    }

    pub fn add_friend_edge(&self, a: PersonId, b: PersonId) -> RepoResult<()> {
        self.graph().add_friend_edge(a, b)
    }

    pub fn remove_friend_edge(&self, a: PersonId, b: PersonId) -> RepoResult<()> {
        self.graph().remove_friend_edge(a, b)
    }

    pub fn friends_of(&self, id: PersonId) -> RepoResult<Vec<Person>> {
        self.graph().friends_of(id)
    }

    pub fn common_friends(&self, a: PersonId, b: PersonId) -> RepoResult<Vec<Person>> {
        self.graph().common_friends(a, b)
    }

    // --- media items ---

    /// Validates and stores a new media item.
    ///
    /// A supplied `liked_by` set is kept when every id names a stored person.
    pub fn add_media_item(&self, candidate: MediaItem) -> RepoResult<MediaItem> {
        validation::validate_media_item(&candidate)
            .map_err(|err| rejected("media_item_add", err))?;
        self.ensure_people_exist(candidate.liked_by.iter().copied())?;

        let stored = self.items.add(candidate);
        info!("event=media_item_add module=service status=ok id={}", stored.id);
        Ok(stored)
    }

    /// Replaces every field of a stored media item, `liked_by` included.
    pub fn update_media_item(&self, candidate: MediaItem) -> RepoResult<MediaItem> {
        validation::validate_media_item(&candidate)
            .map_err(|err| rejected("media_item_update", err))?;
        self.ensure_people_exist(candidate.liked_by.iter().copied())?;

        let stored = self.items.update(candidate)?;
        info!("event=media_item_update module=service status=ok id={}", stored.id);
        Ok(stored)
    }

    pub fn get_media_item(&self, id: MediaItemId) -> RepoResult<MediaItem> {
        self.items.get(id)
    }

    pub fn list_media_items(&self) -> Vec<MediaItem> {
        self.items.list()
    }

    pub fn remove_media_item(&self, id: MediaItemId) -> RepoResult<()> {
        self.items.remove(id)?;
        info!("event=media_item_remove module=service status=ok id={id}");
        Ok(())
    }

    pub fn like(&self, item_id: MediaItemId, person_id: PersonId) -> RepoResult<()> {
        self.ranking().like(item_id, person_id)
    }

    pub fn unlike(&self, item_id: MediaItemId, person_id: PersonId) -> RepoResult<()> {
        self.ranking().unlike(item_id, person_id)
    }

    /// Returns up to `count` media items, most liked first, ties by id.
    pub fn top_popular(&self, count: i64) -> Vec<MediaItem> {
        self.ranking().top_popular(count)
    }

    fn ensure_people_exist<I>(&self, ids: I) -> RepoResult<()>
    where
        I: IntoIterator<Item = EntityId>,
    {
        let missing: Vec<EntityId> = ids
            .into_iter()
            .filter(|id| !self.people.contains(*id))
            .collect();
        if missing.is_empty() {
            return Ok(());
        }
        Err(RepoError::NotFound {
            kind: EntityKind::Person,
            ids: missing,
        })
    }
}

fn rejected(event: &str, err: ValidationError) -> RepoError {
    warn!(
        "event={event} module=service status=rejected rule={}",
        err.code()
    );
    RepoError::Validation(err)
}

#[cfg(test)]
mod tests {
    use super::CatalogService;
    use crate::model::person::Person;
    use crate::repo::error::RepoError;
    use chrono::NaiveDate;

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
    }

    #[test]
    fn injected_clock_drives_birthday_rule() {
        let service = CatalogService::new().with_clock(fixed_today);
        let born_later = Person::new(
            "late@email.test",
            "late",
            "",
            NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
        );

        let err = service.add_person(born_later).unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
        assert!(service.list_people().is_empty());
    }

    #[test]
    fn add_person_drops_supplied_friends() {
        let service = CatalogService::new();
        let mut candidate = Person::new(
            "solo@email.test",
            "solo",
            "",
            NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
        );
        candidate.friends.insert(77);

        let stored = service.add_person(candidate).unwrap();
        assert!(stored.friends.is_empty());
    }
}
