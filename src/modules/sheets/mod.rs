//! Spreadsheet store module
//!
//! Whole-table access to the worksheet holding the reports: an HTTP client
//! for the spreadsheet values API, an in-memory store, and a TTL read cache.

mod cached_store;
mod memory_store;
mod sheets_client;
mod store;

pub use cached_store::CachedStore;
pub use memory_store::MemoryStore;
pub use sheets_client::SheetsClient;
pub use store::{ReportStore, StoreError, Table};
