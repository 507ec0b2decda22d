//! Generic record store over a key-value storage backend.
//!
//! # Responsibility
//! - Load one module's snapshot, with an explicit policy for corrupt data.
//! - Stage, persist and then apply list mutations for the service layer.
//!
//! # Invariants
//! - A snapshot that is absent or `[]` loads as the module seed list.
//! - A snapshot with duplicate ids is treated as corrupt.
//! - Mutations persist the staged list first and swap it in only on success.

use crate::model::module::RecordModule;
use crate::storage::kv::{KeyValueStorage, StorageError};
use log::{debug, error, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;
use std::time::Instant;

pub type StoreResult<T> = Result<T, StoreError>;

/// Record store error for snapshot reads, writes and id conflicts.
#[derive(Debug)]
pub enum StoreError {
    Storage(StorageError),
    /// Records could not be encoded to JSON.
    Serialize {
        key: &'static str,
        source: serde_json::Error,
    },
    /// Persisted snapshot was rejected under `SnapshotRecovery::Strict`.
    CorruptSnapshot {
        key: &'static str,
        reason: String,
    },
    /// A record with this id is already present.
    DuplicateId {
        key: &'static str,
        id: String,
    },
    /// Sequential ids already reached the largest representable suffix.
    IdSpaceExhausted {
        key: &'static str,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Serialize { key, source } => {
                write!(f, "failed to serialize snapshot `{key}`: {source}")
            }
            Self::CorruptSnapshot { key, reason } => {
                write!(f, "corrupt snapshot under `{key}`: {reason}")
            }
            Self::DuplicateId { key, id } => {
                write!(f, "record id `{id}` already exists in `{key}`")
            }
            Self::IdSpaceExhausted { key } => {
                write!(f, "no record ids left to assign in `{key}`")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Serialize { source, .. } => Some(source),
            Self::CorruptSnapshot { .. }
            | Self::DuplicateId { .. }
            | Self::IdSpaceExhausted { .. } => None,
        }
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// What to do when the persisted snapshot cannot be decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SnapshotRecovery {
    /// Load seed data, log a warning and report `LoadSource::RecoveredFromCorrupt`.
    ///
    /// The corrupt value stays in storage until the next write replaces it.
    #[default]
    FallbackToSeed,
    /// Fail with `StoreError::CorruptSnapshot`.
    Strict,
}

/// Where the current in-memory list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Nothing usable was persisted; seed list is active.
    Seed,
    /// Decoded from the persisted snapshot.
    Persisted,
    /// Persisted snapshot was corrupt; seed list is active.
    RecoveredFromCorrupt,
}

impl LoadSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Seed => "seed",
            Self::Persisted => "persisted",
            Self::RecoveredFromCorrupt => "recovered_from_corrupt",
        }
    }
}

/// Ordered, persisted list of one module's records.
pub struct RecordStore<M: RecordModule, S: KeyValueStorage> {
    storage: S,
    records: Vec<M::Record>,
    source: LoadSource,
    _module: PhantomData<fn() -> M>,
}

impl<M: RecordModule, S: KeyValueStorage> RecordStore<M, S> {
    /// Loads the module snapshot with `SnapshotRecovery::FallbackToSeed`.
    pub fn load(storage: S) -> StoreResult<Self> {
        Self::load_with(storage, SnapshotRecovery::default())
    }

    /// Loads the module snapshot using the given corrupt-data policy.
    ///
    /// # Errors
    /// - `StoreError::Storage` when the storage read fails.
    /// - `StoreError::CorruptSnapshot` under `SnapshotRecovery::Strict`.
    pub fn load_with(storage: S, recovery: SnapshotRecovery) -> StoreResult<Self> {
        let started_at = Instant::now();
        let raw = storage.get_item(M::STORE_KEY).map_err(|err| {
            error!(
                "event=store_load module=store status=error key={} error_code=storage_read_failed error={err}",
                M::STORE_KEY
            );
            err
        })?;

        let (records, source) = match raw {
            None => (M::seed(), LoadSource::Seed),
            Some(raw) => match decode_snapshot::<M>(&raw) {
                Ok(records) if records.is_empty() => (M::seed(), LoadSource::Seed),
                Ok(records) => (records, LoadSource::Persisted),
                Err(reason) => match recovery {
                    SnapshotRecovery::FallbackToSeed => {
                        warn!(
                            "event=store_load module=store status=fallback key={} reason={reason}",
                            M::STORE_KEY
                        );
                        (M::seed(), LoadSource::RecoveredFromCorrupt)
                    }
                    SnapshotRecovery::Strict => {
                        error!(
                            "event=store_load module=store status=error key={} error_code=corrupt_snapshot reason={reason}",
                            M::STORE_KEY
                        );
                        return Err(StoreError::CorruptSnapshot {
                            key: M::STORE_KEY,
                            reason,
                        });
                    }
                },
            },
        };

        info!(
            "event=store_load module=store status=ok key={} source={} count={} duration_ms={}",
            M::STORE_KEY,
            source.as_str(),
            records.len(),
            started_at.elapsed().as_millis()
        );

        Ok(Self {
            storage,
            records,
            source,
            _module: PhantomData,
        })
    }

    pub fn key(&self) -> &'static str {
        M::STORE_KEY
    }

    pub fn load_source(&self) -> LoadSource {
        self.source
    }

    pub fn records(&self) -> &[M::Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&M::Record> {
        self.records
            .iter()
            .find(|record| M::record_id(record) == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Writes the current list under the module key.
    pub fn persist(&self) -> StoreResult<()> {
        self.write_snapshot(&self.records)
    }

    /// Replaces all records with the seed list and persists it.
    pub fn reset_to_seed(&mut self) -> StoreResult<()> {
        self.commit(M::seed())?;
        self.source = LoadSource::Seed;
        info!(
            "event=store_reset module=store status=ok key={} count={}",
            M::STORE_KEY,
            self.records.len()
        );
        Ok(())
    }

    /// Returns an id the module strategy guarantees is not in use.
    ///
    /// # Errors
    /// - `StoreError::IdSpaceExhausted` when no sequential suffix is left.
    pub fn next_id(&self) -> StoreResult<String> {
        M::ID_STRATEGY
            .next_id(self.records.iter().map(|record| M::record_id(record)))
            .ok_or(StoreError::IdSpaceExhausted { key: M::STORE_KEY })
    }

    pub(crate) fn insert_front(&mut self, record: M::Record) -> StoreResult<()> {
        let id = M::record_id(&record);
        if self.contains(id) {
            return Err(StoreError::DuplicateId {
                key: M::STORE_KEY,
                id: id.to_string(),
            });
        }

        let mut next = Vec::with_capacity(self.records.len() + 1);
        next.push(record);
        next.extend(self.records.iter().cloned());
        self.commit(next)
    }

    /// Replaces the record with the same id. Returns `false` when absent.
    pub(crate) fn replace(&mut self, record: M::Record) -> StoreResult<bool> {
        let Some(index) = self.position(M::record_id(&record)) else {
            return Ok(false);
        };

        let mut next = self.records.clone();
        next[index] = record;
        self.commit(next)?;
        Ok(true)
    }

    /// Removes and returns the record with `id`, if present.
    pub(crate) fn remove(&mut self, id: &str) -> StoreResult<Option<M::Record>> {
        let Some(index) = self.position(id) else {
            return Ok(None);
        };

        let mut next = self.records.clone();
        let removed = next.remove(index);
        self.commit(next)?;
        Ok(Some(removed))
    }

    /// Applies `change` to the record with `id` and persists when it reports a change.
    ///
    /// Returns `None` when absent, otherwise the value returned by `change`.
    pub(crate) fn modify(
        &mut self,
        id: &str,
        change: impl FnOnce(&mut M::Record) -> bool,
    ) -> StoreResult<Option<bool>> {
        let Some(index) = self.position(id) else {
            return Ok(None);
        };

        let mut next = self.records.clone();
        if !change(&mut next[index]) {
            return Ok(Some(false));
        }
        self.commit(next)?;
        Ok(Some(true))
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records
            .iter()
            .position(|record| M::record_id(record) == id)
    }

    fn commit(&mut self, next: Vec<M::Record>) -> StoreResult<()> {
        self.write_snapshot(&next)?;
        self.records = next;
        Ok(())
    }

    fn write_snapshot(&self, records: &[M::Record]) -> StoreResult<()> {
        let started_at = Instant::now();
        let json = serde_json::to_string(records).map_err(|source| StoreError::Serialize {
            key: M::STORE_KEY,
            source,
        })?;

        if let Err(err) = self.storage.set_item(M::STORE_KEY, &json) {
            error!(
                "event=store_persist module=store status=error key={} bytes={} error_code=storage_write_failed error={err}",
                M::STORE_KEY,
                json.len()
            );
            return Err(err.into());
        }

        debug!(
            "event=store_persist module=store status=ok key={} count={} bytes={} duration_ms={}",
            M::STORE_KEY,
            records.len(),
            json.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }
}

fn decode_snapshot<M: RecordModule>(raw: &str) -> Result<Vec<M::Record>, String> {
    let records: Vec<M::Record> =
        serde_json::from_str(raw).map_err(|err| format!("parse_error: {err}"))?;

    let mut seen = HashSet::with_capacity(records.len());
    for record in &records {
        let id = M::record_id(record);
        if !seen.insert(id) {
            return Err(format!("duplicate_id: {id}"));
        }
    }

    Ok(records)
}
