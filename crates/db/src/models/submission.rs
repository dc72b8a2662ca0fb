use finserv_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `contact_submissions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContactSubmission {
    pub id: DbId,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub interest_type: String,
    pub created_at: Timestamp,
}
