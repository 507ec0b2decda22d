//! Module catalogue.
//!
//! # Responsibility
//! - Configure one `RecordModule` per back-office module.
//! - Provide typed summary metrics per module.
//!
//! # Invariants
//! - Each module owns exactly one storage key; keys never overlap.
//! - Modules share nothing; there are no cross-module references.

use crate::model::module::RecordModule;
use std::time::{SystemTime, UNIX_EPOCH};

pub mod campaigns;
pub mod drivers;
pub mod inventory;
pub mod orders;
pub mod vendors;

/// Storage keys of every module in the catalogue.
pub const ALL_STORE_KEYS: &[&str] = &[
    <orders::Orders as RecordModule>::STORE_KEY,
    <inventory::Inventory as RecordModule>::STORE_KEY,
    <vendors::Vendors as RecordModule>::STORE_KEY,
    <campaigns::Campaigns as RecordModule>::STORE_KEY,
    <drivers::Drivers as RecordModule>::STORE_KEY,
];

/// Current wall clock in Unix epoch milliseconds.
///
/// Falls back to `0` if the clock reads before the epoch.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as i64)
}

#[cfg(test)]
mod tests {
    use super::ALL_STORE_KEYS;
    use crate::storage::kv::is_valid_storage_key;
    use std::collections::HashSet;

    #[test]
    fn store_keys_are_valid_and_distinct() {
        let unique: HashSet<_> = ALL_STORE_KEYS.iter().collect();
        assert_eq!(unique.len(), ALL_STORE_KEYS.len());
        assert!(ALL_STORE_KEYS.iter().all(|key| is_valid_storage_key(key)));
    }
}
