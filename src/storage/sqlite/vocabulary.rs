//! SQLite implementation of VocabularyStore

use anyhow::{Context, Result};
use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension, params, params_from_iter};

use super::SqliteStore;
use crate::page::ListFilter;
use crate::storage::traits::VocabularyStore;
use crate::storage::types::{NewVocabulary, Vocabulary};

/// Columns the keyword filter searches.
const SEARCH_COLUMNS: &[&str] = &["kanji", "furigana", "meaning"];

pub(crate) fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- Vocabulary entries. AUTOINCREMENT so ids are never reused.
        CREATE TABLE IF NOT EXISTS vocabulary (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            kanji TEXT NOT NULL UNIQUE,
            furigana TEXT,
            meaning TEXT NOT NULL,
            star INTEGER NOT NULL DEFAULT 0
        );
        "#,
    )
    .context("Failed to initialize vocabulary schema")?;
    Ok(())
}

fn row_to_vocabulary(row: &rusqlite::Row<'_>) -> rusqlite::Result<Vocabulary> {
    Ok(Vocabulary {
        id: row.get(0)?,
        kanji: row.get(1)?,
        furigana: row.get(2)?,
        meaning: row.get(3)?,
        star: row.get(4)?,
    })
}

#[async_trait]
impl VocabularyStore for SqliteStore {
    async fn list_vocabulary(
        &self,
        filter: &ListFilter,
        skip: i64,
        take: i64,
    ) -> Result<(Vec<Vocabulary>, u64)> {
        let conn = self.conn().lock().unwrap();
        let (where_sql, bind) = filter.where_clause(SEARCH_COLUMNS);

        let total: u64 = conn
            .query_row(
                &format!("SELECT COUNT(*) FROM vocabulary {where_sql}"),
                params_from_iter(bind.iter()),
                |row| row.get(0),
            )
            .context("Failed to count vocabulary")?;

        // Ordering must be applied before slicing: starred first,
        // newest first within each star group.
        let mut stmt = conn.prepare(&format!(
            "SELECT id, kanji, furigana, meaning, star FROM vocabulary {where_sql} \
             ORDER BY star DESC, id DESC LIMIT {take} OFFSET {skip}"
        ))?;
        let rows = stmt
            .query_map(params_from_iter(bind.iter()), row_to_vocabulary)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to list vocabulary")?;

        Ok((rows, total))
    }

    async fn vocabulary_by_id(&self, id: i64) -> Result<Option<Vocabulary>> {
        let conn = self.conn().lock().unwrap();
        let row = conn
            .query_row(
                "SELECT id, kanji, furigana, meaning, star FROM vocabulary WHERE id = ?1",
                params![id],
                row_to_vocabulary,
            )
            .optional()
            .context("Failed to look up vocabulary")?;
        Ok(row)
    }

    async fn create_vocabulary(&self, row: &NewVocabulary) -> Result<Vocabulary> {
        let conn = self.conn().lock().unwrap();
        conn.execute(
            "INSERT INTO vocabulary (kanji, furigana, meaning) VALUES (?1, ?2, ?3)",
            params![row.kanji, row.furigana, row.meaning],
        )
        .context("Failed to insert vocabulary")?;

        Ok(Vocabulary {
            id: conn.last_insert_rowid(),
            kanji: row.kanji.clone(),
            furigana: row.furigana.clone(),
            meaning: row.meaning.clone(),
            star: false,
        })
    }

    async fn update_vocabulary(&self, id: i64, row: &NewVocabulary) -> Result<bool> {
        let conn = self.conn().lock().unwrap();
        let updated = conn
            .execute(
                "UPDATE vocabulary SET kanji = ?1, furigana = ?2, meaning = ?3 WHERE id = ?4",
                params![row.kanji, row.furigana, row.meaning, id],
            )
            .context("Failed to update vocabulary")?;
        Ok(updated > 0)
    }

    async fn toggle_vocabulary_star(&self, id: i64) -> Result<bool> {
        let conn = self.conn().lock().unwrap();
        // Single-statement flip; no read-modify-write window.
        let updated = conn
            .execute(
                "UPDATE vocabulary SET star = NOT star WHERE id = ?1",
                params![id],
            )
            .context("Failed to toggle vocabulary star")?;
        Ok(updated > 0)
    }

    async fn upsert_vocabulary(&self, rows: &[NewVocabulary]) -> Result<()> {
        let mut conn = self.conn().lock().unwrap();
        let tx = conn.transaction()?;
        {
            // The WHERE guard skips rows whose values are unchanged,
            // leaving their id and star flag untouched.
            let mut stmt = tx.prepare(
                "INSERT INTO vocabulary (kanji, furigana, meaning) VALUES (?1, ?2, ?3) \
                 ON CONFLICT(kanji) DO UPDATE SET \
                   furigana = excluded.furigana, meaning = excluded.meaning \
                 WHERE furigana IS NOT excluded.furigana OR meaning IS NOT excluded.meaning",
            )?;
            for row in rows {
                stmt.execute(params![row.kanji, row.furigana, row.meaning])
                    .with_context(|| format!("Failed to upsert vocabulary {:?}", row.kanji))?;
            }
        }
        tx.commit().context("Failed to commit vocabulary import")?;
        Ok(())
    }
}
