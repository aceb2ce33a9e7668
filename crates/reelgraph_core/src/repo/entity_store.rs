//! Keyed entity store contract and in-memory implementation.
//!
//! # Responsibility
//! - Allocate ids and provide CRUD for one entity kind.
//! - Offer atomic closure-based mutation for relation services.
//!
//! # Invariants
//! - The first id is `1`; ids strictly increase and are never reused, even
//!   after removal.
//! - One `RwLock` per store: reads share, writes exclude.
//! - Removal never cascades into other records' relation sets.
//! - A poisoned lock is a fatal programming error and panics.

use crate::model::entity::{Entity, EntityId, EntityKind};
use crate::repo::error::{RepoError, RepoResult};
use log::debug;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Storage contract for one entity kind.
pub trait EntityStore<E: Entity>: Send + Sync {
    /// Stores `entity` under a freshly allocated id and returns the stored copy.
    /// Any incoming id is overwritten.
    fn add(&self, entity: E) -> E;

    fn get(&self, id: EntityId) -> RepoResult<E>;

    fn contains(&self, id: EntityId) -> bool;

    /// Resolves `ids` under one read lock, skipping ids that are not stored.
    fn get_many<I>(&self, ids: I) -> Vec<E>
    where
        I: IntoIterator<Item = EntityId>;

    /// Returns all entities in ascending id order.
    fn list(&self) -> Vec<E>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replaces every field of the stored entity with `entity`'s.
    fn update(&self, entity: E) -> RepoResult<E>;

    /// Mutates one stored entity in place under the write lock.
    fn update_with<R, F>(&self, id: EntityId, f: F) -> RepoResult<R>
    where
        F: FnOnce(&mut E) -> R;

    /// Mutates two stored entities under one write lock, passing them to `f`
    /// in argument order.
    ///
    /// Reports every missing id and mutates nothing unless both exist.
    /// Callers must pass `a != b`.
    fn update_pair_with<F>(&self, a: EntityId, b: EntityId, f: F) -> RepoResult<()>
    where
        F: FnOnce(&mut E, &mut E);

    fn remove(&self, id: EntityId) -> RepoResult<()>;
}

/// `RwLock`-guarded ordered map with an atomic id counter.
pub struct InMemoryStore<E: Entity> {
    entries: RwLock<BTreeMap<EntityId, E>>,
    last_id: AtomicU64,
}

impl<E: Entity> Default for InMemoryStore<E> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
            last_id: AtomicU64::new(0),
        }
    }
}

impl<E: Entity> InMemoryStore<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(&self) -> EntityKind {
        E::KIND
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<EntityId, E>> {
        self.entries.read().expect("entity store lock poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<EntityId, E>> {
        self.entries.write().expect("entity store lock poisoned")
    }
}

impl<E: Entity> EntityStore<E> for InMemoryStore<E> {
    fn add(&self, mut entity: E) -> E {
        let mut entries = self.write();
        let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        entity.assign_id(id);
        entries.insert(id, entity.clone());
        debug!(
            "event=entity_add module=repo status=ok kind={} id={}",
            E::KIND,
            id
        );
        entity
    }

    fn get(&self, id: EntityId) -> RepoResult<E> {
        self.read()
            .get(&id)
            .cloned()
            .ok_or_else(|| RepoError::not_found(E::KIND, id))
    }

    fn contains(&self, id: EntityId) -> bool {
        self.read().contains_key(&id)
    }

    fn get_many<I>(&self, ids: I) -> Vec<E>
    where
        I: IntoIterator<Item = EntityId>,
    {
        let entries = self.read();
        ids.into_iter()
            .filter_map(|id| entries.get(&id).cloned())
            .collect()
    }

    fn list(&self) -> Vec<E> {
        self.read().values().cloned().collect()
    }

    fn len(&self) -> usize {
        self.read().len()
    }

    fn update(&self, entity: E) -> RepoResult<E> {
        let id = entity.id();
        let mut entries = self.write();
        let Some(stored) = entries.get_mut(&id) else {
            return Err(RepoError::not_found(E::KIND, id));
        };
        *stored = entity.clone();
        debug!(
            "event=entity_update module=repo status=ok kind={} id={}",
            E::KIND,
            id
        );
        Ok(entity)
    }

    fn update_with<R, F>(&self, id: EntityId, f: F) -> RepoResult<R>
    where
        F: FnOnce(&mut E) -> R,
    {
        let mut entries = self.write();
        let stored = entries
            .get_mut(&id)
            .ok_or_else(|| RepoError::not_found(E::KIND, id))?;
        Ok(f(stored))
    }

    fn update_pair_with<F>(&self, a: EntityId, b: EntityId, f: F) -> RepoResult<()>
    where
        F: FnOnce(&mut E, &mut E),
    {
        assert_ne!(a, b, "update_pair_with requires two distinct ids");

        let mut entries = self.write();
        let missing: Vec<EntityId> = [a, b]
            .into_iter()
            .filter(|id| !entries.contains_key(id))
            .collect();
        if !missing.is_empty() {
            return Err(RepoError::NotFound {
                kind: E::KIND,
                ids: missing,
            });
        }

        // Detach `a` so `b` can be borrowed mutably alongside it.
        if let Some(mut first) = entries.remove(&a) {
            if let Some(second) = entries.get_mut(&b) {
                f(&mut first, second);
            }
            entries.insert(a, first);
        }
        Ok(())
    }

    fn remove(&self, id: EntityId) -> RepoResult<()> {
        if self.write().remove(&id).is_none() {
            return Err(RepoError::not_found(E::KIND, id));
        }
        debug!(
            "event=entity_remove module=repo status=ok kind={} id={}",
            E::KIND,
            id
        );
        Ok(())
    }
}
