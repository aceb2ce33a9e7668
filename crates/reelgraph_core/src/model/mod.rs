//! Domain model for people, media items and the relations between them.
//!
//! # Responsibility
//! - Define canonical records used by validation, storage and services.
//! - Describe the identity contract shared by every stored entity kind.
//!
//! # Invariants
//! - Every stored record is identified by a store-assigned `EntityId`.
//! - Relation sets (`friends`, `liked_by`) hold ids only, never records.

pub mod entity;
pub mod media_item;
pub mod person;
