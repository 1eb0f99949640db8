//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts where rows are created directly

pub mod course;
pub mod progress;
pub mod subject;
pub mod subject_item;
pub mod user;
