//! Record mutation service.
//!
//! # Responsibility
//! - Validate form input, assign ids and module defaults on insert.
//! - Replace, delete and toggle records by id.
//! - Forward list reads to the projection helpers.
//!
//! # Invariants
//! - Validation runs before the store is touched.
//! - Inserted records are prepended, so lists read most recent first.
//! - Update/delete/toggle of an unknown id leaves the store unchanged and is
//!   reported as an outcome, not an error.
//! - Delete only happens after `Confirm::confirm` returns `true`.

use crate::model::module::{RecordModule, StatusToggle, ValidationError};
use crate::projection::{project, ListPage, ListQuery};
use crate::storage::kv::KeyValueStorage;
use crate::store::record_store::{RecordStore, StoreError};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for record mutations.
#[derive(Debug)]
pub enum ServiceError {
    /// Required-field check failed; nothing was written.
    Validation(ValidationError),
    /// Snapshot read/write failure; in-memory state is unchanged.
    Store(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Result of an update or status toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    Applied,
    /// No record has the requested id.
    NotFound,
    /// Record exists but the change did not apply to its current state.
    Unchanged,
}

/// Result of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// User dismissed the confirmation prompt.
    Declined,
    NotFound,
}

/// Blocking yes/no prompt shown before a delete.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Confirms every prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Declines every prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverConfirm;

impl Confirm for NeverConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        false
    }
}

/// Mutation gateway over one module's record store.
pub struct RecordService<M: RecordModule, S: KeyValueStorage> {
    store: RecordStore<M, S>,
}

impl<M: RecordModule, S: KeyValueStorage> RecordService<M, S> {
    /// Wraps an already loaded store.
    pub fn new(store: RecordStore<M, S>) -> Self {
        Self { store }
    }

    /// Loads the module store from `storage` with the default recovery policy.
    pub fn load(storage: S) -> ServiceResult<Self> {
        Ok(Self::new(RecordStore::load(storage)?))
    }

    pub fn store(&self) -> &RecordStore<M, S> {
        &self.store
    }

    pub fn records(&self) -> &[M::Record] {
        self.store.records()
    }

    pub fn get(&self, id: &str) -> Option<&M::Record> {
        self.store.get(id)
    }

    /// Filters and paginates the full list for display.
    pub fn list(&self, query: &ListQuery) -> ListPage<'_, M::Record> {
        project::<M>(self.store.records(), query)
    }

    /// Validates `draft`, assigns a fresh id and module defaults, then prepends.
    ///
    /// # Errors
    /// - `ServiceError::Validation` when a required field is missing.
    /// - `ServiceError::Store` when no id is left to assign or the snapshot write fails.
    pub fn insert(&mut self, draft: M::Draft) -> ServiceResult<M::Record> {
        if let Err(err) = M::validate_draft(&draft) {
            warn!(
                "event=record_insert module=service status=rejected store={} reason={err}",
                M::STORE_KEY
            );
            return Err(err.into());
        }

        let id = match self.store.next_id() {
            Ok(id) => id,
            Err(err) => {
                error!(
                    "event=record_insert module=service status=error store={} error_code=id_space_exhausted",
                    M::STORE_KEY
                );
                return Err(err.into());
            }
        };
        let record = M::build_record(id, draft);
        self.store.insert_front(record.clone())?;

        info!(
            "event=record_insert module=service status=ok store={} id={} count={}",
            M::STORE_KEY,
            M::record_id(&record),
            self.store.len()
        );
        Ok(record)
    }

    /// Replaces the record that has the same id as `record`.
    pub fn update(&mut self, record: M::Record) -> ServiceResult<MutationOutcome> {
        M::validate_record(&record)?;
        let record = M::normalize_record(record);
        let id = M::record_id(&record).to_string();

        if !self.store.replace(record)? {
            info!(
                "event=record_update module=service status=not_found store={} id={id}",
                M::STORE_KEY
            );
            return Ok(MutationOutcome::NotFound);
        }

        info!(
            "event=record_update module=service status=ok store={} id={id}",
            M::STORE_KEY
        );
        Ok(MutationOutcome::Applied)
    }

    /// Asks `confirm` and removes the record with `id` when accepted.
    ///
    /// Unknown ids return `DeleteOutcome::NotFound` without prompting.
    pub fn delete(&mut self, id: &str, confirm: &dyn Confirm) -> ServiceResult<DeleteOutcome> {
        if !self.store.contains(id) {
            return Ok(DeleteOutcome::NotFound);
        }

        let prompt = format!("Delete {} record {id}? This cannot be undone.", M::NAME);
        if !confirm.confirm(&prompt) {
            info!(
                "event=record_delete module=service status=declined store={} id={id}",
                M::STORE_KEY
            );
            return Ok(DeleteOutcome::Declined);
        }

        match self.store.remove(id)? {
            Some(_) => {
                info!(
                    "event=record_delete module=service status=ok store={} id={id} count={}",
                    M::STORE_KEY,
                    self.store.len()
                );
                Ok(DeleteOutcome::Deleted)
            }
            None => Ok(DeleteOutcome::NotFound),
        }
    }

    /// Replaces every record with the module seed list.
    pub fn reset_to_seed(&mut self) -> ServiceResult<()> {
        self.store.reset_to_seed()?;
        Ok(())
    }
}

impl<M: StatusToggle, S: KeyValueStorage> RecordService<M, S> {
    /// Flips the status of the record with `id` between its two fixed values.
    pub fn toggle_status(&mut self, id: &str) -> ServiceResult<MutationOutcome> {
        let outcome = match self.store.modify(id, M::toggle_status)? {
            None => MutationOutcome::NotFound,
            Some(false) => MutationOutcome::Unchanged,
            Some(true) => MutationOutcome::Applied,
        };

        info!(
            "event=record_toggle module=service status={} store={} id={id}",
            outcome_label(outcome),
            M::STORE_KEY
        );
        Ok(outcome)
    }
}

fn outcome_label(outcome: MutationOutcome) -> &'static str {
    match outcome {
        MutationOutcome::Applied => "ok",
        MutationOutcome::NotFound => "not_found",
        MutationOutcome::Unchanged => "unchanged",
    }
}
