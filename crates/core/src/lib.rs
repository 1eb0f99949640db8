//! Student progress and grading domain.
//!
//! Contains the catalog and progress types, the enrollment, score-update and
//! aggregation operations, and the store traits they run against. This crate
//! has no database dependencies: `campus-db` implements the store traits on
//! PostgreSQL and [`memory::InMemoryStore`] implements them in process.

pub mod aggregation;
pub mod attendance;
pub mod catalog;
pub mod enrollment;
pub mod error;
pub mod memory;
pub mod progress;
pub mod score_form;
pub mod scoring;
pub mod store;
pub mod types;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support;
