//! Friendship graph over the person store.
//!
//! # Responsibility
//! - Maintain the undirected friendship relation stored in `Person::friends`.
//! - Answer friend-list and common-friend queries with full records.
//!
//! # Invariants
//! - Edge mutations touch both endpoints under one store write lock, or
//!   neither when an endpoint is missing.
//! - Adding an existing edge and removing an absent edge are successful no-ops.
//! - A self-edge `(a, a)` is accepted and stored as `a ∈ a.friends`.

use crate::model::entity::EntityKind;
use crate::model::person::{Person, PersonId};
use crate::repo::entity_store::EntityStore;
use crate::repo::error::{RepoError, RepoResult};
use log::info;

/// Graph service borrowing a person store.
pub struct FriendshipService<'s, S: EntityStore<Person>> {
    people: &'s S,
}

impl<'s, S: EntityStore<Person>> FriendshipService<'s, S> {
    pub fn new(people: &'s S) -> Self {
        Self { people }
    }

    /// Links `a` and `b` as mutual friends.
    pub fn add_friend_edge(&self, a: PersonId, b: PersonId) -> RepoResult<()> {
        if a == b {
            self.people.update_with(a, |person| {
                person.friends.insert(a);
            })?;
        } else {
            self.people.update_pair_with(a, b, |first, second| {
                first.friends.insert(b);
                second.friends.insert(a);
            })?;
        }
        info!("event=friend_add module=graph status=ok a={a} b={b}");
        Ok(())
    }

    /// Unlinks `a` and `b`. Succeeds when no edge exists.
    pub fn remove_friend_edge(&self, a: PersonId, b: PersonId) -> RepoResult<()> {
        if a == b {
            self.people.update_with(a, |person| {
                person.friends.remove(&a);
            })?;
        } else {
            self.people.update_pair_with(a, b, |first, second| {
                first.friends.remove(&b);
                second.friends.remove(&a);
            })?;
        }
        info!("event=friend_remove module=graph status=ok a={a} b={b}");
        Ok(())
    }

    /// Returns friends of `id` in ascending id order.
    ///
    /// Ids of people removed after befriending are skipped.
    pub fn friends_of(&self, id: PersonId) -> RepoResult<Vec<Person>> {
        let person = self.people.get(id)?;
        Ok(self.people.get_many(person.friends.iter().copied()))
    }

    /// Returns people who are friends of both `a` and `b`, by ascending id.
    pub fn common_friends(&self, a: PersonId, b: PersonId) -> RepoResult<Vec<Person>> {
        let (first, second) = self.fetch_pair(a, b)?;
        let shared = first.friends.intersection(&second.friends).copied();
        Ok(self.people.get_many(shared))
    }

    fn fetch_pair(&self, a: PersonId, b: PersonId) -> RepoResult<(Person, Person)> {
        match (self.people.get(a), self.people.get(b)) {
            (Ok(first), Ok(second)) => Ok((first, second)),
            (first, second) => {
                let mut ids = Vec::with_capacity(2);
                if first.is_err() {
                    ids.push(a);
                }
                if second.is_err() && b != a {
                    ids.push(b);
                }
                Err(RepoError::NotFound {
                    kind: EntityKind::Person,
                    ids,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FriendshipService;
    use crate::model::person::Person;
    use crate::repo::entity_store::{EntityStore, InMemoryStore};
    use chrono::NaiveDate;

    fn seeded(count: usize) -> InMemoryStore<Person> {
        let store = InMemoryStore::new();
        let birthday = NaiveDate::from_ymd_opt(1990, 5, 5).unwrap();
        for n in 0..count {
            let login = format!("user{n}");
            store.add(Person::new(format!("{login}@email.test"), login.clone(), login, birthday));
        }
        store
    }

    #[test]
    fn self_edge_is_stored_once_and_removable() {
        let store = seeded(1);
        let graph = FriendshipService::new(&store);

        graph.add_friend_edge(1, 1).unwrap();
        assert!(store.get(1).unwrap().is_friend_of(1));

        graph.remove_friend_edge(1, 1).unwrap();
        assert!(store.get(1).unwrap().friends.is_empty());
    }

    #[test]
    fn friends_of_skips_removed_people() {
        let store = seeded(3);
        let graph = FriendshipService::new(&store);
        graph.add_friend_edge(1, 2).unwrap();
        graph.add_friend_edge(1, 3).unwrap();
        store.remove(3).unwrap();

        let friends = graph.friends_of(1).unwrap();
        assert_eq!(friends.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2]);
        assert!(store.get(1).unwrap().is_friend_of(3));
    }
}
