//! Key-value persistence boundary for module snapshots.
//!
//! # Responsibility
//! - Define the string-keyed storage contract record stores write through.
//! - Provide SQLite-backed and in-memory implementations.
//!
//! # Invariants
//! - Keys are validated before any read or write.
//! - A write either replaces the whole value under a key or fails.

pub mod kv;
