//! Storage trait definitions
//!
//! All storage traits are defined here, with the SQLite
//! implementations in `sqlite/`.

use anyhow::Result;
use async_trait::async_trait;

use crate::page::ListFilter;
use crate::storage::types::{
    Grammar, Honorific, HonorificKind, NewGrammar, NewVocabulary, Onomatopoeia, RiAdverb,
    Vocabulary,
};

/// Trait for vocabulary storage operations
#[async_trait]
pub trait VocabularyStore: Send + Sync {
    /// One page of the filtered collection, ordered star-first then
    /// newest-first, plus the filtered total before slicing.
    async fn list_vocabulary(
        &self,
        filter: &ListFilter,
        skip: i64,
        take: i64,
    ) -> Result<(Vec<Vocabulary>, u64)>;

    /// Look up a single entry by id.
    async fn vocabulary_by_id(&self, id: i64) -> Result<Option<Vocabulary>>;

    /// Insert a new entry, starting unstarred.
    async fn create_vocabulary(&self, row: &NewVocabulary) -> Result<Vocabulary>;

    /// Full-field overwrite. Ok(false) when the id does not exist.
    async fn update_vocabulary(&self, id: i64, row: &NewVocabulary) -> Result<bool>;

    /// Invert the star flag in a single statement. Ok(false) when the
    /// id does not exist.
    async fn toggle_vocabulary_star(&self, id: i64) -> Result<bool>;

    /// Bulk idempotent upsert keyed on `kanji`. Rows whose stored
    /// field values already match are left untouched.
    async fn upsert_vocabulary(&self, rows: &[NewVocabulary]) -> Result<()>;
}

/// Trait for grammar-point storage operations
#[async_trait]
pub trait GrammarStore: Send + Sync {
    async fn list_grammar(
        &self,
        filter: &ListFilter,
        skip: i64,
        take: i64,
    ) -> Result<(Vec<Grammar>, u64)>;

    async fn grammar_by_id(&self, id: i64) -> Result<Option<Grammar>>;

    async fn create_grammar(&self, row: &NewGrammar) -> Result<Grammar>;

    /// Full-field overwrite. Ok(false) when the id does not exist.
    async fn update_grammar(&self, id: i64, row: &NewGrammar) -> Result<bool>;

    /// Invert the star flag. Ok(false) when the id does not exist.
    async fn toggle_grammar_star(&self, id: i64) -> Result<bool>;

    /// Bulk idempotent upsert keyed on the grammar phrase.
    async fn upsert_grammar(&self, rows: &[NewGrammar]) -> Result<()>;
}

/// Trait for the read-only reference tables (honorifics, り-adverbs,
/// onomatopoeia).
#[async_trait]
pub trait ReferenceStore: Send + Sync {
    /// All honorific pairs of one kind.
    async fn honorifics(&self, kind: HonorificKind) -> Result<Vec<Honorific>>;

    /// The full り-adverb list.
    async fn ri_adverbs(&self) -> Result<Vec<RiAdverb>>;

    /// The full onomatopoeia list.
    async fn onomatopoeia(&self) -> Result<Vec<Onomatopoeia>>;
}
