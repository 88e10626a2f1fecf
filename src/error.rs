use thiserror::Error;

/// Failure modes of a search request.
///
/// All variants are terminal for the current request; there is no retry or
/// fallback inside the engine. `Canceled` is the normal abandonment path
/// (deadline or client disconnect), not a store fault.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The pool could not be established or a connection borrow failed.
    /// Fatal at startup, a failed search at request time.
    #[error("database connection failed: {0}")]
    Connection(#[source] sqlx::Error),

    /// The store rejected or failed to run the statement.
    #[error("search query failed: {0}")]
    QueryExecution(#[source] sqlx::Error),

    /// A returned row did not match the expected columns/types. The whole
    /// query is aborted; no partial result set is surfaced.
    #[error("malformed search result row: {0}")]
    RowDecode(#[source] sqlx::Error),

    /// The request's cancellation signal fired before the result set was
    /// complete. Resources are released; the caller gets no rows.
    #[error("search canceled before completion")]
    Canceled,
}

impl SearchError {
    /// Classify an error raised while executing a statement or pulling rows
    /// from its cursor. Decode-shaped faults are kept distinct from
    /// connectivity loss; anything else is a store-side execution failure.
    pub fn from_execution(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => SearchError::Connection(err),
            sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::ColumnIndexOutOfBounds { .. }
            | sqlx::Error::TypeNotFound { .. }
            | sqlx::Error::Decode(_) => SearchError::RowDecode(err),
            _ => SearchError::QueryExecution(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_faults_classify_as_connection() {
        assert!(matches!(
            SearchError::from_execution(sqlx::Error::PoolTimedOut),
            SearchError::Connection(_)
        ));
        assert!(matches!(
            SearchError::from_execution(sqlx::Error::PoolClosed),
            SearchError::Connection(_)
        ));
    }

    #[test]
    fn column_faults_classify_as_row_decode() {
        assert!(matches!(
            SearchError::from_execution(sqlx::Error::ColumnNotFound("rank".into())),
            SearchError::RowDecode(_)
        ));
        assert!(matches!(
            SearchError::from_execution(sqlx::Error::ColumnIndexOutOfBounds { index: 4, len: 4 }),
            SearchError::RowDecode(_)
        ));
    }

    #[test]
    fn store_faults_classify_as_query_execution() {
        assert!(matches!(
            SearchError::from_execution(sqlx::Error::Protocol("bad packet".into())),
            SearchError::QueryExecution(_)
        ));
        assert!(matches!(
            SearchError::from_execution(sqlx::Error::RowNotFound),
            SearchError::QueryExecution(_)
        ));
    }
}
