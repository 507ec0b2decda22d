//! Persisted per-module record stores.
//!
//! # Responsibility
//! - Rehydrate a module's record list from storage or fall back to seed data.
//! - Re-serialize the whole list after every change.
//!
//! # Invariants
//! - Record ids are unique within a store.
//! - In-memory state only changes after the matching snapshot write succeeds.

pub mod record_store;
