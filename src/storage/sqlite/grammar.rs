//! SQLite implementation of GrammarStore

use anyhow::{Context, Result};
use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension, params, params_from_iter};

use super::SqliteStore;
use crate::page::ListFilter;
use crate::storage::traits::GrammarStore;
use crate::storage::types::{Grammar, NewGrammar};

/// Columns the keyword filter searches. The memo is not searchable.
const SEARCH_COLUMNS: &[&str] = &["grammar", "furigana", "meaning"];

pub(crate) fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- Grammar points. AUTOINCREMENT so ids are never reused.
        CREATE TABLE IF NOT EXISTS grammar (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            grammar TEXT NOT NULL UNIQUE,
            furigana TEXT,
            meaning TEXT NOT NULL,
            memo TEXT,
            star INTEGER NOT NULL DEFAULT 0
        );
        "#,
    )
    .context("Failed to initialize grammar schema")?;
    Ok(())
}

fn row_to_grammar(row: &rusqlite::Row<'_>) -> rusqlite::Result<Grammar> {
    Ok(Grammar {
        id: row.get(0)?,
        grammar: row.get(1)?,
        furigana: row.get(2)?,
        meaning: row.get(3)?,
        memo: row.get(4)?,
        star: row.get(5)?,
    })
}

#[async_trait]
impl GrammarStore for SqliteStore {
    async fn list_grammar(
        &self,
        filter: &ListFilter,
        skip: i64,
        take: i64,
    ) -> Result<(Vec<Grammar>, u64)> {
        let conn = self.conn().lock().unwrap();
        let (where_sql, bind) = filter.where_clause(SEARCH_COLUMNS);

        let total: u64 = conn
            .query_row(
                &format!("SELECT COUNT(*) FROM grammar {where_sql}"),
                params_from_iter(bind.iter()),
                |row| row.get(0),
            )
            .context("Failed to count grammar")?;

        let mut stmt = conn.prepare(&format!(
            "SELECT id, grammar, furigana, meaning, memo, star FROM grammar {where_sql} \
             ORDER BY star DESC, id DESC LIMIT {take} OFFSET {skip}"
        ))?;
        let rows = stmt
            .query_map(params_from_iter(bind.iter()), row_to_grammar)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to list grammar")?;

        Ok((rows, total))
    }

    async fn grammar_by_id(&self, id: i64) -> Result<Option<Grammar>> {
        let conn = self.conn().lock().unwrap();
        let row = conn
            .query_row(
                "SELECT id, grammar, furigana, meaning, memo, star FROM grammar WHERE id = ?1",
                params![id],
                row_to_grammar,
            )
            .optional()
            .context("Failed to look up grammar")?;
        Ok(row)
    }

    async fn create_grammar(&self, row: &NewGrammar) -> Result<Grammar> {
        let conn = self.conn().lock().unwrap();
        conn.execute(
            "INSERT INTO grammar (grammar, furigana, meaning, memo) VALUES (?1, ?2, ?3, ?4)",
            params![row.grammar, row.furigana, row.meaning, row.memo],
        )
        .context("Failed to insert grammar")?;

        Ok(Grammar {
            id: conn.last_insert_rowid(),
            grammar: row.grammar.clone(),
            furigana: row.furigana.clone(),
            meaning: row.meaning.clone(),
            memo: row.memo.clone(),
            star: false,
        })
    }

    async fn update_grammar(&self, id: i64, row: &NewGrammar) -> Result<bool> {
        let conn = self.conn().lock().unwrap();
        let updated = conn
            .execute(
                "UPDATE grammar SET grammar = ?1, furigana = ?2, meaning = ?3, memo = ?4 \
                 WHERE id = ?5",
                params![row.grammar, row.furigana, row.meaning, row.memo, id],
            )
            .context("Failed to update grammar")?;
        Ok(updated > 0)
    }

    async fn toggle_grammar_star(&self, id: i64) -> Result<bool> {
        let conn = self.conn().lock().unwrap();
        let updated = conn
            .execute(
                "UPDATE grammar SET star = NOT star WHERE id = ?1",
                params![id],
            )
            .context("Failed to toggle grammar star")?;
        Ok(updated > 0)
    }

    async fn upsert_grammar(&self, rows: &[NewGrammar]) -> Result<()> {
        let mut conn = self.conn().lock().unwrap();
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO grammar (grammar, furigana, meaning, memo) VALUES (?1, ?2, ?3, ?4) \
                 ON CONFLICT(grammar) DO UPDATE SET \
                   furigana = excluded.furigana, meaning = excluded.meaning, memo = excluded.memo \
                 WHERE furigana IS NOT excluded.furigana \
                    OR meaning IS NOT excluded.meaning \
                    OR memo IS NOT excluded.memo",
            )?;
            for row in rows {
                stmt.execute(params![row.grammar, row.furigana, row.meaning, row.memo])
                    .with_context(|| format!("Failed to upsert grammar {:?}", row.grammar))?;
            }
        }
        tx.commit().context("Failed to commit grammar import")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(grammar: &str, meaning: &str, memo: Option<&str>) -> NewGrammar {
        NewGrammar {
            grammar: grammar.to_string(),
            furigana: None,
            meaning: meaning.to_string(),
            memo: memo.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn memo_is_not_searched_by_keyword() {
        let store = SqliteStore::in_memory().unwrap();
        store
            .create_grammar(&point("〜ばかり", "just did", Some("colloquial note")))
            .await
            .unwrap();

        let (_, total) = store
            .list_grammar(&ListFilter::Keyword("colloquial".into()), 0, 10)
            .await
            .unwrap();
        assert_eq!(total, 0);

        let (_, total) = store
            .list_grammar(&ListFilter::Keyword("just".into()), 0, 10)
            .await
            .unwrap();
        assert_eq!(total, 1);
    }

    #[tokio::test]
    async fn upsert_updates_memo_changes_only() {
        let store = SqliteStore::in_memory().unwrap();
        store
            .create_grammar(&point("〜ながら", "while doing", None))
            .await
            .unwrap();
        store.toggle_grammar_star(1).await.unwrap();

        store
            .upsert_grammar(&[point("〜ながら", "while doing", Some("two actions"))])
            .await
            .unwrap();

        let g = store.grammar_by_id(1).await.unwrap().unwrap();
        assert_eq!(g.memo.as_deref(), Some("two actions"));
        assert!(g.star);
    }

    #[tokio::test]
    async fn star_toggle_reports_missing_id() {
        let store = SqliteStore::in_memory().unwrap();
        assert!(!store.toggle_grammar_star(42).await.unwrap());
    }
}
