//! Repository layer: keyed entity storage and the failure kinds it reports.
//!
//! # Responsibility
//! - Define the store contract the graph and ranking services depend on.
//! - Provide the in-memory implementation used by the application service.
//!
//! # Invariants
//! - Store APIs return semantic `NotFound` errors carrying kind and ids.
//! - Multi-entity mutations apply to all targets or to none.

pub mod entity_store;
pub mod error;
