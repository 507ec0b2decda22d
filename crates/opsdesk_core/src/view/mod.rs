//! Ephemeral list view state.
//!
//! # Responsibility
//! - Track search text, current page and the open detail/edit surface.
//!
//! # Invariants
//! - Nothing here is persisted; a fresh mount starts closed on page 1.
//! - At most one surface is open at a time.

pub mod list_state;
pub mod surface;
