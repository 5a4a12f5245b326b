//! SQLite storage backend
//!
//! Provides `SqliteStore` - a shared SQLite connection wrapper that
//! implements all storage traits. Trait implementations live in
//! submodules:
//! - `vocabulary` - VocabularyStore impl
//! - `grammar` - GrammarStore impl
//! - `reference` - ReferenceStore impl (honorific, り-adverb,
//!   onomatopoeia tables)

use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};

mod grammar;
mod reference;
mod vocabulary;

pub(crate) use grammar::init_schema as init_grammar_schema;
pub(crate) use reference::init_schema as init_reference_schema;
pub(crate) use vocabulary::init_schema as init_vocabulary_schema;

/// Shared SQLite connection
///
/// Create one store and share it via `Arc` across all components that
/// need database access. Each trait implementation locks the
/// connection for the duration of its statement; SQLite itself is the
/// arbiter of write consistency.
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open or create a SQLite database at the given path
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(&path)?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory SQLite database (useful for testing)
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        init_vocabulary_schema(&conn)?;
        init_grammar_schema(&conn)?;
        init_reference_schema(&conn)?;
        Ok(())
    }

    pub(crate) fn conn(&self) -> &Arc<Mutex<Connection>> {
        &self.conn
    }
}
