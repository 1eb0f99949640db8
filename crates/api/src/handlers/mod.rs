pub mod attendance;
pub mod catalog;
pub mod enrollment;
pub mod progress;
pub mod scores;
pub mod users;
