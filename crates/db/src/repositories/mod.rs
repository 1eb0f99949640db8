//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod course_repo;
pub mod progress_repo;
pub mod subject_item_repo;
pub mod subject_repo;
pub mod user_repo;

pub use course_repo::CourseRepo;
pub use progress_repo::ProgressRepo;
pub use subject_item_repo::SubjectItemRepo;
pub use subject_repo::SubjectRepo;
pub use user_repo::UserRepo;
