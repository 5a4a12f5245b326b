//! Pagination and filtered listing
//!
//! Every list endpoint shares the same shape: a 1-based page number,
//! a page size, an optional keyword, and an optional starred-only
//! flag are turned into a bounded, ordered slice of a record
//! collection plus metadata describing the caller's position in the
//! full filtered set. The storage layer performs the actual count and
//! slice; this module owns the arithmetic and the out-of-range
//! policy.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

fn default_page_number() -> i64 {
    1
}

fn default_page_size() -> i64 {
    10
}

/// Query parameters accepted by every paginated endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    #[serde(default = "default_page_number")]
    pub page_number: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub starred: bool,
}

impl PageQuery {
    /// Page numbers of zero or below are treated as page one.
    pub fn normalized_page_number(&self) -> i64 {
        if self.page_number <= 0 { 1 } else { self.page_number }
    }

    /// Offset of the first row of the requested page. Saturates for
    /// absurd page numbers; such a request falls out through the
    /// out-of-range policy rather than overflowing here.
    pub fn skip(&self) -> i64 {
        self.normalized_page_number()
            .saturating_sub(1)
            .saturating_mul(self.page_size)
    }

    /// A non-positive page size would make `lastPage` meaningless, so
    /// it is rejected up front rather than normalized.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.page_size <= 0 {
            return Err(ApiError::Validation("pageSize must be positive".into()));
        }
        Ok(())
    }

    pub fn filter(&self) -> ListFilter {
        ListFilter::new(self.keyword.as_deref(), self.starred)
    }
}

/// Filter predicate for a list request, resolved once from the query
/// instead of being assembled field-by-field at the call site.
/// Keyword and starred combine as AND.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListFilter {
    All,
    Keyword(String),
    Starred,
    StarredKeyword(String),
}

impl ListFilter {
    /// An empty keyword counts as absent; a blank `keyword` query
    /// parameter must not filter anything out.
    pub fn new(keyword: Option<&str>, starred: bool) -> Self {
        match (keyword.filter(|k| !k.is_empty()), starred) {
            (None, false) => ListFilter::All,
            (Some(k), false) => ListFilter::Keyword(k.to_string()),
            (None, true) => ListFilter::Starred,
            (Some(k), true) => ListFilter::StarredKeyword(k.to_string()),
        }
    }

    /// Render the predicate as a SQL `WHERE` clause over the entity's
    /// searchable text columns, plus the LIKE pattern to bind as
    /// parameter 1. Substring matching is case-insensitive under
    /// SQLite's default `LIKE`.
    pub fn where_clause(&self, columns: &[&str]) -> (String, Vec<String>) {
        let keyword_sql = |cols: &[&str]| {
            let parts: Vec<String> = cols.iter().map(|c| format!("{c} LIKE ?1")).collect();
            format!("({})", parts.join(" OR "))
        };
        match self {
            ListFilter::All => (String::new(), Vec::new()),
            ListFilter::Keyword(k) => (
                format!("WHERE {}", keyword_sql(columns)),
                vec![format!("%{k}%")],
            ),
            ListFilter::Starred => ("WHERE star = 1".to_string(), Vec::new()),
            ListFilter::StarredKeyword(k) => (
                format!("WHERE {} AND star = 1", keyword_sql(columns)),
                vec![format!("%{k}%")],
            ),
        }
    }
}

/// Position metadata for one page of a filtered result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: u64,
    pub page_number: i64,
    pub page_size: i64,
    pub last_page: i64,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

impl PageMeta {
    pub fn new(query: &PageQuery, total: u64) -> Self {
        let page_number = query.normalized_page_number();
        let page_size = query.page_size;
        // ceil(total / pageSize), with lastPage = 0 for an empty set
        let last_page = (total as i64 + page_size - 1) / page_size;
        Self {
            total,
            page_number,
            page_size,
            last_page,
            has_previous_page: page_number > 1,
            has_next_page: page_number < last_page,
        }
    }
}

/// One page of records plus its metadata. Derived on every request,
/// never stored.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    /// Combine an already-sliced record set with its filtered total.
    ///
    /// A truly empty result (the filter matched nothing) is a
    /// successful empty page with `lastPage = 0`. Overshooting a
    /// non-empty result set is an error instead, so that clients
    /// paging forward get a stop signal they can distinguish from
    /// "no data at all".
    pub fn assemble(data: Vec<T>, query: &PageQuery, total: u64) -> Result<Self, ApiError> {
        let meta = PageMeta::new(query, total);
        if total > 0 && meta.page_number > meta.last_page {
            return Err(ApiError::PageOutOfRange);
        }
        Ok(Self { data, meta })
    }
}
