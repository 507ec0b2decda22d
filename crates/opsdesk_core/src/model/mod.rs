//! Module-agnostic record model.
//!
//! # Responsibility
//! - Define the per-module configuration contract (`RecordModule`).
//! - Provide identifier generation and form-level validation helpers.
//!
//! # Invariants
//! - Every record is identified by a stable string id.
//! - Ids are unique within one module store and never rewritten.

pub mod id;
pub mod module;
