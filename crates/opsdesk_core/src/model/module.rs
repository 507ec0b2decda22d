//! Per-module configuration contract.
//!
//! # Responsibility
//! - Describe one module's record shape, storage key, seed data, search
//!   fields, required-field checks and insert defaults.
//! - Keep the generic store/projection/gateway free of module field sets.
//!
//! # Invariants
//! - `record_id` is stable for the lifetime of a record.
//! - `build_record` must use the id it is given verbatim.
//! - `seed` is deterministic across calls.

use crate::model::id::IdStrategy;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Page size used by modules that do not override it.
pub const DEFAULT_PAGE_SIZE: usize = 8;

/// Form-level validation failure, raised before any mutation runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field is absent or blank after trim.
    MissingField(&'static str),
    /// Field is present but not acceptable.
    InvalidValue {
        field: &'static str,
        message: String,
    },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "required field `{field}` is missing"),
            Self::InvalidValue { field, message } => {
                write!(f, "invalid value for `{field}`: {message}")
            }
        }
    }
}

impl Error for ValidationError {}

/// Configuration for one module's record store.
pub trait RecordModule {
    /// Persisted record shape.
    type Record: Clone + PartialEq + Serialize + DeserializeOwned;
    /// Create-form input: the record minus id and system-assigned fields.
    type Draft;

    /// Human-readable module name used in logs and prompts.
    const NAME: &'static str;
    /// Storage key the snapshot lives under.
    const STORE_KEY: &'static str;
    const PAGE_SIZE: usize = DEFAULT_PAGE_SIZE;
    const ID_STRATEGY: IdStrategy;

    fn record_id(record: &Self::Record) -> &str;

    /// Fixed fallback list used when nothing usable is persisted.
    fn seed() -> Vec<Self::Record>;

    /// Fields the list search box matches against.
    fn search_fields(record: &Self::Record) -> Vec<&str>;

    /// Required-field checks for the create form.
    fn validate_draft(draft: &Self::Draft) -> Result<(), ValidationError>;

    /// Required-field checks for the edit form.
    fn validate_record(_record: &Self::Record) -> Result<(), ValidationError> {
        Ok(())
    }

    /// Applies module defaults to a validated draft.
    fn build_record(id: String, draft: Self::Draft) -> Self::Record;

    /// Re-derives computed fields before an edited record is saved.
    fn normalize_record(record: Self::Record) -> Self::Record {
        record
    }
}

/// Modules whose records flip between two fixed status values.
pub trait StatusToggle: RecordModule {
    /// Flips the status in place.
    ///
    /// Returns `false` when the record is in a status outside the toggle pair.
    fn toggle_status(record: &mut Self::Record) -> bool;
}

/// Fails with `MissingField` when `value` is blank after trim.
pub fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

/// Fails with `InvalidValue` when `value` is negative or not finite.
pub fn require_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::InvalidValue {
            field,
            message: format!("expected a non-negative number, got {value}"),
        });
    }
    Ok(())
}
