//! Write seam between the HTTP layer and MySQL.

use async_trait::async_trait;
use finserv_core::submission::NewSubmission;
use finserv_core::types::DbId;

use crate::repositories::ContactSubmissionRepo;
use crate::{ConnectionProvider, StoreError};

/// Persists validated submissions.
///
/// The production implementation is [`ConnectionProvider`]; tests drive
/// the handler with in-memory implementations.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Insert one submission atomically and return its new id.
    async fn insert(&self, submission: &NewSubmission) -> Result<DbId, StoreError>;

    /// Check that the datastore is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}

#[async_trait]
impl SubmissionStore for ConnectionProvider {
    async fn insert(&self, submission: &NewSubmission) -> Result<DbId, StoreError> {
        let handle = self.acquire();
        let limit = self.config().query_timeout;

        let result = match handle.lock().await {
            Ok(mut conn) => {
                let insert = ContactSubmissionRepo::insert(&mut *conn, submission);
                match tokio::time::timeout(limit, insert).await {
                    Ok(result) => result.map_err(StoreError::from),
                    Err(_) => Err(StoreError::QueryTimeout(limit)),
                }
            }
            Err(e) => Err(e),
        };

        if let Err(err) = &result {
            tracing::error!(error = %err, connection = err.is_connection(), "Database error");
        }
        self.discard_if_fatal(&handle, &result);
        result
    }

    async fn ping(&self) -> Result<(), StoreError> {
        ConnectionProvider::ping(self).await
    }
}
