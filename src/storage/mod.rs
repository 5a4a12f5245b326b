//! Persistence layer
//!
//! Traits in `traits`, record types in `types`, and the SQLite
//! implementation in `sqlite`.

pub mod sqlite;
pub mod traits;
pub mod types;

pub use sqlite::SqliteStore;
