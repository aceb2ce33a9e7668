//! Core use-case services.
//!
//! # Responsibility
//! - Maintain the friendship and like relations over entity stores.
//! - Expose the application facade that transport layers call.
//!
//! # Invariants
//! - Services depend on the `EntityStore` contract, not a concrete container.
//! - Writes are validated before any store mutation.

pub mod catalog_service;
pub mod friendship_service;
pub mod ranking_service;
