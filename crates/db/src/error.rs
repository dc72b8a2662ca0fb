use std::time::Duration;

/// Failure writing to or reading from the submission store.
///
/// Converting from [`sqlx::Error`] sorts the error into the connection class
/// (server unreachable, link dropped) or the query class (everything the
/// server itself rejected).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The connection is unusable; the handle must be discarded.
    #[error(transparent)]
    Connection(sqlx::Error),

    /// The server rejected or failed the statement.
    #[error(transparent)]
    Query(sqlx::Error),

    #[error("Connection attempt timed out after {}s", .0.as_secs())]
    ConnectTimeout(Duration),

    /// The handle was discarded while this statement waited for it.
    #[error("Database handle was closed after a connection failure")]
    HandleClosed,

    #[error("Query inactivity timeout after {}s", .0.as_secs())]
    QueryTimeout(Duration),
}

impl StoreError {
    /// Whether the datastore was unreachable or the link was lost.
    pub fn is_connection(&self) -> bool {
        matches!(
            self,
            StoreError::Connection(_) | StoreError::ConnectTimeout(_) | StoreError::HandleClosed
        )
    }

    /// Whether the handle must be discarded before the next use. A statement
    /// cut off by its timeout leaves the connection mid-protocol.
    pub fn is_fatal(&self) -> bool {
        self.is_connection() || matches!(self, StoreError::QueryTimeout(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if is_connection_error(&err) {
            StoreError::Connection(err)
        } else {
            StoreError::Query(err)
        }
    }
}

/// Classify a sqlx error as a failure of the link itself.
///
/// SQLSTATE class `08` is "connection exception" (e.g. `08S01`,
/// communication link failure). Pool wait timeouts are not link failures.
pub fn is_connection_error(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Io(_) | sqlx::Error::Tls(_) | sqlx::Error::WorkerCrashed => true,
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.starts_with("08")),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn refused_connection_is_connection_class() {
        let err = sqlx::Error::Io(io::Error::from(io::ErrorKind::ConnectionRefused));
        assert_matches!(StoreError::from(err), StoreError::Connection(_));
    }

    #[test]
    fn waiting_for_a_busy_connection_is_not_fatal() {
        let err = StoreError::from(sqlx::Error::PoolTimedOut);
        assert!(!err.is_connection());
        assert!(!err.is_fatal());
    }

    #[test]
    fn connect_timeout_and_closed_handle_are_connection_class() {
        assert!(StoreError::ConnectTimeout(Duration::from_secs(10)).is_connection());
        assert!(StoreError::HandleClosed.is_connection());
        assert!(StoreError::HandleClosed.is_fatal());
    }

    #[test]
    fn other_errors_are_query_class() {
        let err = StoreError::from(sqlx::Error::Protocol("unexpected packet".into()));
        assert_matches!(err, StoreError::Query(_));
        assert!(!err.is_fatal());
        assert!(!StoreError::from(sqlx::Error::RowNotFound).is_connection());
    }

    #[test]
    fn timeout_is_fatal_but_not_connection() {
        let err = StoreError::QueryTimeout(Duration::from_secs(10));
        assert!(err.is_fatal());
        assert!(!err.is_connection());
        assert_eq!(err.to_string(), "Query inactivity timeout after 10s");
    }

    #[test]
    fn display_is_underlying_text() {
        let err = StoreError::from(sqlx::Error::Protocol("unexpected packet".into()));
        assert_eq!(
            err.to_string(),
            sqlx::Error::Protocol("unexpected packet".into()).to_string()
        );
    }
}
