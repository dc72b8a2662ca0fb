//! Repository layer: one zero-sized struct per table with associated
//! async functions taking the handle explicitly.

pub mod submission_repo;

pub use submission_repo::ContactSubmissionRepo;
