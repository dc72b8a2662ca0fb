//! Domain types and validation for contact-form submissions.
//!
//! Pure logic only; persistence lives in `finserv_db` and HTTP in
//! `finserv_api`.

pub mod error;
pub mod submission;
pub mod types;
