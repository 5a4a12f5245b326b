//! SQLite implementation of ReferenceStore
//!
//! The honorific, り-adverb, and onomatopoeia tables are read-only
//! from the API's perspective; their rows are loaded out of band.

use anyhow::{Context, Result};
use async_trait::async_trait;
use rusqlite::{Connection, params};

use super::SqliteStore;
use crate::storage::traits::ReferenceStore;
use crate::storage::types::{Honorific, HonorificKind, Onomatopoeia, RiAdverb};

pub(crate) fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- Honorific pairs, keyed by direction (UP/DOWN/NORMAL)
        CREATE TABLE IF NOT EXISTS honorific (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            kind TEXT NOT NULL,
            kanji TEXT NOT NULL,
            furigana TEXT NOT NULL,
            meaning TEXT NOT NULL
        );

        -- Adverbs ending in り
        CREATE TABLE IF NOT EXISTS ri_adverb (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            furigana TEXT NOT NULL,
            meaning TEXT NOT NULL
        );

        -- Onomatopoeia with their category
        CREATE TABLE IF NOT EXISTS onomatopoeia (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            category TEXT NOT NULL,
            furigana TEXT NOT NULL,
            meaning TEXT NOT NULL
        );
        "#,
    )
    .context("Failed to initialize reference schema")?;
    Ok(())
}

#[async_trait]
impl ReferenceStore for SqliteStore {
    async fn honorifics(&self, kind: HonorificKind) -> Result<Vec<Honorific>> {
        let conn = self.conn().lock().unwrap();
        let mut stmt = conn
            .prepare("SELECT id, kind, kanji, furigana, meaning FROM honorific WHERE kind = ?1")?;
        let rows = stmt
            .query_map(params![kind], |row| {
                Ok(Honorific {
                    id: row.get(0)?,
                    kind: row.get(1)?,
                    kanji: row.get(2)?,
                    furigana: row.get(3)?,
                    meaning: row.get(4)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to list honorifics")?;
        Ok(rows)
    }

    async fn ri_adverbs(&self) -> Result<Vec<RiAdverb>> {
        let conn = self.conn().lock().unwrap();
        let mut stmt = conn.prepare("SELECT id, furigana, meaning FROM ri_adverb")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(RiAdverb {
                    id: row.get(0)?,
                    furigana: row.get(1)?,
                    meaning: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to list ri-adverbs")?;
        Ok(rows)
    }

    async fn onomatopoeia(&self) -> Result<Vec<Onomatopoeia>> {
        let conn = self.conn().lock().unwrap();
        let mut stmt = conn.prepare("SELECT id, category, furigana, meaning FROM onomatopoeia")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Onomatopoeia {
                    id: row.get(0)?,
                    category: row.get(1)?,
                    furigana: row.get(2)?,
                    meaning: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to list onomatopoeia")?;
        Ok(rows)
    }
}
