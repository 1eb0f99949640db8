/// Courses, subjects, item definitions and users are keyed by UUIDs generated
/// by the service. The 32-hex-digit simple form parses as well.
pub type EntityId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
