use futures::TryStreamExt;
use serde::Serialize;
use sqlx::Row;
use sqlx::postgres::PgRow;
use tokio_util::sync::CancellationToken;

use crate::db::Database;
use crate::error::SearchError;

/// Fixed number of results per page, shared by the statement builder and the
/// row mapper so offset arithmetic and truncation cannot drift apart.
pub const PAGE_SIZE: i64 = 20;

/// Number of leading ranked rows to skip for the given page.
pub fn offset(page: i64) -> i64 {
    page * PAGE_SIZE
}

/// Whether the client-side early stop applies. Negative pages disable it and
/// drain the cursor fully; see [`QueryEngine::search`].
pub fn is_bounded(page: i64) -> bool {
    page >= 0
}

/// One ranked match. Immutable value, created fresh per query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub url: String,
    pub title: String,
    pub snippet: String,
    pub rank: f32,
}

impl SearchResult {
    fn decode(row: &PgRow) -> Result<Self, SearchError> {
        Ok(SearchResult {
            url: row.try_get("url").map_err(SearchError::RowDecode)?,
            title: row.try_get("title").map_err(SearchError::RowDecode)?,
            snippet: row.try_get("snippet").map_err(SearchError::RowDecode)?,
            rank: row.try_get("rank").map_err(SearchError::RowDecode)?,
        })
    }
}

/// Ranked full-text search statement.
///
/// Query parsing is delegated to Postgres: `websearch_to_tsquery` turns the
/// raw text into a tsquery and tolerates operator characters and garbage
/// input. An empty (or fully stripped) query string parses to an empty
/// tsquery, which matches nothing; callers get an empty result set, not an
/// error. Both user inputs are bound as parameters, never interpolated.
///
/// There is deliberately no server-side LIMIT: the statement requests the
/// whole ranked tail past OFFSET and boundedness is enforced client-side by
/// the row loop below. The store may still sort the full tail; adding
/// `LIMIT $3` would be cheaper but changes how the planner handles ranking
/// ties at the page boundary, so it stays client-side for now.
const SEARCH_SQL: &str = r#"
    SELECT
        url,
        title,
        ts_headline(body, query) AS snippet,
        ts_rank_cd(search_index, query) AS rank
    FROM
        search,
        websearch_to_tsquery($1) query
    WHERE query @@ search_index
    ORDER BY rank DESC
    OFFSET $2
"#;

/// Executes paginated ranked searches against the full-text index.
pub struct QueryEngine {
    db: Database,
}

impl QueryEngine {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    /// Run one search and return at most [`PAGE_SIZE`] results ordered by
    /// rank descending. An empty vec is a normal outcome (no matches, or
    /// `offset(page)` past the end of the matches).
    ///
    /// `cancel` is observed between every row: once fired the fetch future
    /// is dropped, which abandons the statement and returns the borrowed
    /// connection to the pool.
    ///
    /// A negative `page` skips the early stop and drains every remaining
    /// row. Normal callers never pass one; the API layer rejects negative
    /// pages before they reach the engine.
    pub async fn search(
        &self,
        query: &str,
        page: i64,
        cancel: &CancellationToken,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let mut rows = sqlx::query(SEARCH_SQL)
            .bind(query)
            .bind(offset(page))
            .fetch(self.db.pool());

        let mut results = Vec::new();

        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(SearchError::Canceled),
                next = rows.try_next() => next.map_err(SearchError::from_execution)?,
            };

            let Some(row) = next else { break };

            // Decode failure aborts the whole query; the stream (and its
            // borrowed connection) is released by drop on this return path.
            results.push(SearchResult::decode(&row)?);

            if is_bounded(page) && results.len() as i64 == PAGE_SIZE {
                break;
            }
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_page_times_page_size() {
        assert_eq!(offset(0), 0);
        assert_eq!(offset(1), 20);
        assert_eq!(offset(2), 40);
        assert_eq!(offset(7), 140);
    }

    #[test]
    fn negative_pages_are_unbounded() {
        assert!(is_bounded(0));
        assert!(is_bounded(5));
        assert!(!is_bounded(-1));
        assert!(!is_bounded(i64::MIN));
    }

    #[test]
    fn statement_binds_parameters_instead_of_interpolating() {
        // The raw query text must never end up inside the SQL; only the
        // placeholders appear.
        assert!(SEARCH_SQL.contains("$1"));
        assert!(SEARCH_SQL.contains("$2"));
        assert!(!SEARCH_SQL.contains("LIMIT"));
    }
}
