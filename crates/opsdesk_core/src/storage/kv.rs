//! Key-value storage contracts and implementations.
//!
//! # Responsibility
//! - Store one serialized snapshot string per module key.
//! - Keep SQL details behind the `KeyValueStorage` trait.
//!
//! # Invariants
//! - Keys match `^[a-z][a-z0-9_.-]*$`.
//! - `set_item` is an upsert; the previous value is fully replaced.
//! - `MemoryStorage` quota checks happen before the value is replaced.

use crate::db::DbError;
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

static STORAGE_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z0-9_.-]*$").expect("valid storage key regex"));

pub type StorageResult<T> = Result<T, StorageError>;

/// Storage-layer error for snapshot reads and writes.
#[derive(Debug)]
pub enum StorageError {
    /// Key does not match the accepted key shape.
    InvalidKey(String),
    /// Write would exceed the configured storage quota.
    QuotaExceeded {
        key: String,
        required_bytes: usize,
        quota_bytes: usize,
    },
    Db(DbError),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidKey(key) => write!(f, "invalid storage key `{key}`"),
            Self::QuotaExceeded {
                key,
                required_bytes,
                quota_bytes,
            } => write!(
                f,
                "storage quota exceeded writing `{key}`: {required_bytes} bytes needed, quota is {quota_bytes}"
            ),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Persistent string-keyed storage used by record stores.
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;
    fn remove_item(&self, key: &str) -> StorageResult<()>;
    /// Returns all stored keys in ascending order.
    fn keys(&self) -> StorageResult<Vec<String>>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for &S {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        (**self).remove_item(key)
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        (**self).keys()
    }
}

/// Returns whether `key` is an acceptable storage key.
pub fn is_valid_storage_key(key: &str) -> bool {
    STORAGE_KEY_RE.is_match(key)
}

fn ensure_valid_key(key: &str) -> StorageResult<()> {
    if is_valid_storage_key(key) {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

/// SQLite-backed key-value storage over the `kv_store` table.
pub struct SqliteKeyValueStorage<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyValueStorage<'conn> {
    /// Constructs storage from a migrated connection.
    ///
    /// # Errors
    /// - Returns `StorageError::Db` when the `kv_store` table is missing.
    pub fn try_new(conn: &'conn Connection) -> StorageResult<Self> {
        conn.prepare("SELECT key, value, updated_at FROM kv_store LIMIT 0;")?;
        Ok(Self { conn })
    }
}

impl KeyValueStorage for SqliteKeyValueStorage<'_> {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        ensure_valid_key(key)?;
        let value = self
            .conn
            .query_row("SELECT value FROM kv_store WHERE key = ?1;", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        ensure_valid_key(key)?;
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        ensure_valid_key(key)?;
        self.conn.execute("DELETE FROM kv_store WHERE key = ?1;", [key])?;
        Ok(())
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT key FROM kv_store ORDER BY key ASC;")?;
        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }
}

/// In-process storage with an optional byte quota.
///
/// The quota counts key and value bytes across all entries, mirroring the
/// way browser storage quotas are accounted.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<BTreeMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates storage that rejects writes once `quota_bytes` would be exceeded.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: RefCell::new(BTreeMap::new()),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Total key + value bytes currently stored.
    pub fn used_bytes(&self) -> usize {
        self.entries
            .borrow()
            .iter()
            .map(|(key, value)| key.len() + value.len())
            .sum()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        ensure_valid_key(key)?;
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        ensure_valid_key(key)?;
        let mut entries = self.entries.borrow_mut();

        if let Some(quota_bytes) = self.quota_bytes {
            let replaced = entries
                .get(key)
                .map_or(0, |previous| key.len() + previous.len());
            let current: usize = entries.iter().map(|(k, v)| k.len() + v.len()).sum();
            let required_bytes = current - replaced + key.len() + value.len();
            if required_bytes > quota_bytes {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    required_bytes,
                    quota_bytes,
                });
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        ensure_valid_key(key)?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        Ok(self.entries.borrow().keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::{is_valid_storage_key, KeyValueStorage, MemoryStorage, StorageError};

    #[test]
    fn storage_key_shape() {
        assert!(is_valid_storage_key("ecommerce.orders"));
        assert!(is_valid_storage_key("inspection_history"));
        assert!(!is_valid_storage_key(""));
        assert!(!is_valid_storage_key("Orders"));
        assert!(!is_valid_storage_key("9lives"));
        assert!(!is_valid_storage_key("has space"));
    }

    #[test]
    fn memory_storage_set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("a.key").unwrap(), None);

        storage.set_item("a.key", "[1]").unwrap();
        storage.set_item("a.key", "[1,2]").unwrap();
        assert_eq!(storage.get_item("a.key").unwrap().as_deref(), Some("[1,2]"));

        storage.remove_item("a.key").unwrap();
        assert_eq!(storage.get_item("a.key").unwrap(), None);
        assert!(storage.keys().unwrap().is_empty());
    }

    #[test]
    fn memory_storage_quota_counts_replacement_not_sum() {
        let storage = MemoryStorage::with_quota(12);
        storage.set_item("k", "0123456789").unwrap();
        // Replacing the same key frees the old value first.
        storage.set_item("k", "abcdefghij").unwrap();

        let err = storage.set_item("k", "abcdefghijkl").unwrap_err();
        assert!(matches!(
            err,
            StorageError::QuotaExceeded {
                required_bytes: 13,
                quota_bytes: 12,
                ..
            }
        ));
        assert_eq!(
            storage.get_item("k").unwrap().as_deref(),
            Some("abcdefghij")
        );
        assert_eq!(storage.used_bytes(), 11);
    }

    #[test]
    fn invalid_key_is_rejected_on_write() {
        let storage = MemoryStorage::new();
        let err = storage.set_item("Bad Key", "[]").unwrap_err();
        match err {
            StorageError::InvalidKey(key) => assert_eq!(key, "Bad Key"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
