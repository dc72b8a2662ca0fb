//! Row structs for the `contact_submissions` table.

pub mod submission;
