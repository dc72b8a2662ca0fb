//! Handler for contact-form submissions.
//!
//! A validated submission is inserted on a detached task while a timer runs
//! alongside it. Whichever finishes first decides the response; the
//! [`ResponseLatch`] makes sure only one of them ever does. The insert is
//! never cancelled, so a submission that times out may still be stored.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use finserv_core::submission::{validate_submission, NewSubmission, THANK_YOU_MESSAGE};
use finserv_core::types::DbId;
use finserv_db::{StoreError, SubmissionStore};
use tokio::task::{JoinError, JoinHandle};

use crate::error::{AppError, AppResult};
use crate::extract::ContactPayload;
use crate::response::SubmissionResponse;
use crate::state::AppState;

/// One-shot flag recording that a response has been claimed.
#[derive(Debug, Clone, Default)]
pub struct ResponseLatch(Arc<AtomicBool>);

impl ResponseLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the right to respond. Returns `true` for the first caller only.
    pub fn claim(&self) -> bool {
        !self.0.swap(true, Ordering::AcqRel)
    }
}

/// POST /api/contact
///
/// Validate and store a contact submission.
pub async fn submit_contact(
    State(state): State<AppState>,
    ContactPayload(form): ContactPayload,
) -> AppResult<Json<SubmissionResponse>> {
    let submission = validate_submission(form)?;

    let latch = ResponseLatch::new();
    let mut query = spawn_insert(Arc::clone(&state.store), submission, latch.clone());

    let outcome = tokio::select! {
        joined = &mut query => joined,
        () = tokio::time::sleep(state.config.submission_timeout) => {
            if latch.claim() {
                tracing::warn!(
                    timeout_secs = state.config.submission_timeout.as_secs_f64(),
                    "Submission insert timed out, responding before it completes",
                );
                return Err(AppError::Timeout);
            }
            // The insert claimed the response just before the timer fired.
            query.await
        }
    };

    let id = flatten(outcome)?;
    tracing::info!(submission_id = id, "Contact submission stored");

    Ok(Json(SubmissionResponse::ok(THANK_YOU_MESSAGE)))
}

/// Run the insert on its own task so it survives the handler returning early.
///
/// On completion the task tries to claim the latch; if the timer already
/// claimed it the outcome is only logged.
fn spawn_insert(
    store: Arc<dyn SubmissionStore>,
    submission: NewSubmission,
    latch: ResponseLatch,
) -> JoinHandle<Result<DbId, StoreError>> {
    tokio::spawn(async move {
        let result = store.insert(&submission).await;
        if !latch.claim() {
            match &result {
                Ok(id) => tracing::warn!(
                    submission_id = id,
                    "Submission stored after timeout response was sent"
                ),
                Err(e) => tracing::warn!(
                    error = %e,
                    "Submission failed after timeout response was sent"
                ),
            }
        }
        result
    })
}

fn flatten(joined: Result<Result<DbId, StoreError>, JoinError>) -> AppResult<DbId> {
    match joined {
        Ok(result) => Ok(result?),
        Err(e) => Err(AppError::InternalError(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latch_claims_once() {
        let latch = ResponseLatch::new();
        let other = latch.clone();
        assert!(latch.claim());
        assert!(!other.claim());
        assert!(!latch.claim());
    }
}
