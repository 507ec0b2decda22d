//! Core record management for the opsdesk back office.
//! Every module list (orders, inventory, vendors, ...) is a `RecordStore`
//! configured by a `RecordModule` and changed only through `RecordService`.

pub mod db;
pub mod logging;
pub mod metrics;
pub mod model;
pub mod modules;
pub mod projection;
pub mod service;
pub mod storage;
pub mod store;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::id::IdStrategy;
pub use model::module::{RecordModule, StatusToggle, ValidationError, DEFAULT_PAGE_SIZE};
pub use projection::{filter_records, page_count, paginate, project, ListPage, ListQuery};
pub use service::record_service::{
    AlwaysConfirm, Confirm, DeleteOutcome, MutationOutcome, NeverConfirm, RecordService,
    ServiceError, ServiceResult,
};
pub use storage::kv::{
    KeyValueStorage, MemoryStorage, SqliteKeyValueStorage, StorageError, StorageResult,
};
pub use store::record_store::{LoadSource, RecordStore, SnapshotRecovery, StoreError, StoreResult};
pub use view::list_state::ListViewState;
pub use view::surface::Surface;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
