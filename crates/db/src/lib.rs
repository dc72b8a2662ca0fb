//! MySQL persistence for contact submissions.
//!
//! The service keeps a single lazily-opened connection per process
//! (see [`ConnectionProvider`]) and writes through the [`SubmissionStore`]
//! trait so the HTTP layer never touches sqlx directly.

pub mod config;
pub mod error;
pub mod models;
pub mod provider;
pub mod repositories;
pub mod store;

pub use error::StoreError;
pub use provider::{ConnectionProvider, DbHandle};
pub use store::SubmissionStore;
