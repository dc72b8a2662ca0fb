//! Repository for the `contact_submissions` table.

use finserv_core::submission::NewSubmission;
use finserv_core::types::DbId;
use sqlx::mysql::MySqlExecutor;
use sqlx::MySqlPool;

use crate::models::submission::ContactSubmission;

/// Column list for `contact_submissions` queries.
const SUBMISSION_COLUMNS: &str = "id, name, phone, email, interest_type, created_at";

/// Insert and lookup operations for contact submissions.
pub struct ContactSubmissionRepo;

impl ContactSubmissionRepo {
    /// Insert one submission as a single statement and return its new id.
    ///
    /// `email` is bound as SQL `NULL` when absent. Runs on any executor so
    /// the shared connection and test pools both work.
    pub async fn insert<'e, E>(executor: E, input: &NewSubmission) -> Result<DbId, sqlx::Error>
    where
        E: MySqlExecutor<'e>,
    {
        let result = sqlx::query(
            "INSERT INTO contact_submissions (name, phone, email, interest_type) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(&input.name)
        .bind(&input.phone)
        .bind(input.email.as_deref())
        .bind(&input.interest_type)
        .execute(executor)
        .await?;

        Ok(result.last_insert_id())
    }

    /// Find a submission by its ID.
    pub async fn find_by_id(
        pool: &MySqlPool,
        id: DbId,
    ) -> Result<Option<ContactSubmission>, sqlx::Error> {
        let query = format!("SELECT {SUBMISSION_COLUMNS} FROM contact_submissions WHERE id = ?");
        sqlx::query_as::<_, ContactSubmission>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Total number of stored submissions.
    pub async fn count(pool: &MySqlPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM contact_submissions")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
