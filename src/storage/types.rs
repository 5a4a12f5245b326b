//! Record types shared between the storage traits and the HTTP layer.

use serde::{Deserialize, Serialize};

/// A vocabulary entry. `kanji` is unique across the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub id: i64,
    pub kanji: String,
    pub furigana: Option<String>,
    pub meaning: String,
    pub star: bool,
}

/// Field set for creating or overwriting a vocabulary entry. Also the
/// target shape of one CSV import row.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewVocabulary {
    pub kanji: String,
    #[serde(default)]
    pub furigana: Option<String>,
    pub meaning: String,
}

/// A grammar point. The `grammar` phrase is unique across the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grammar {
    pub id: i64,
    pub grammar: String,
    pub furigana: Option<String>,
    pub meaning: String,
    pub memo: Option<String>,
    pub star: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewGrammar {
    pub grammar: String,
    #[serde(default)]
    pub furigana: Option<String>,
    pub meaning: String,
    #[serde(default)]
    pub memo: Option<String>,
}

/// Direction of an honorific form relative to plain speech.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HonorificKind {
    Up,
    Down,
    Normal,
}

impl HonorificKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HonorificKind::Up => "UP",
            HonorificKind::Down => "DOWN",
            HonorificKind::Normal => "NORMAL",
        }
    }
}

impl rusqlite::types::FromSql for HonorificKind {
    fn column_result(value: rusqlite::types::ValueRef<'_>) -> rusqlite::types::FromSqlResult<Self> {
        match value.as_str()? {
            "UP" => Ok(HonorificKind::Up),
            "DOWN" => Ok(HonorificKind::Down),
            "NORMAL" => Ok(HonorificKind::Normal),
            other => Err(rusqlite::types::FromSqlError::Other(
                format!("unknown honorific kind {other:?}").into(),
            )),
        }
    }
}

impl rusqlite::types::ToSql for HonorificKind {
    fn to_sql(&self) -> rusqlite::Result<rusqlite::types::ToSqlOutput<'_>> {
        Ok(rusqlite::types::ToSqlOutput::Borrowed(
            rusqlite::types::ValueRef::Text(self.as_str().as_bytes()),
        ))
    }
}

/// An honorific pair, read-only from the API's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Honorific {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: HonorificKind,
    pub kanji: String,
    pub furigana: String,
    pub meaning: String,
}

/// A り-adverb, read-only and list-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiAdverb {
    pub id: i64,
    pub furigana: String,
    pub meaning: String,
}

/// An onomatopoeia entry, read-only and list-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Onomatopoeia {
    pub id: i64,
    pub category: String,
    pub furigana: String,
    pub meaning: String,
}
