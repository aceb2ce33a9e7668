//! Core domain logic for reelgraph: people, media items, friendships and
//! popularity ranking.
//! This crate is the single source of truth for business invariants.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod validation;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::entity::{Entity, EntityId, EntityKind};
pub use model::media_item::{MediaItem, MediaItemId};
pub use model::person::{Person, PersonId};
pub use repo::entity_store::{EntityStore, InMemoryStore};
pub use repo::error::{RepoError, RepoResult};
pub use service::catalog_service::CatalogService;
pub use service::friendship_service::FriendshipService;
pub use service::ranking_service::{RankingService, DEFAULT_POPULAR_COUNT};
pub use validation::{
    accept_person_at, is_valid_email, normalize_person, validate_media_item, validate_person,
    validate_person_at, ValidationError, CINEMA_EPOCH, MAX_DESCRIPTION_CHARS,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
