//! Core use-case services.
//!
//! # Responsibility
//! - Expose the only sanctioned insert/update/delete/toggle entry points.
//! - Keep callers decoupled from storage and snapshot details.

pub mod record_service;
