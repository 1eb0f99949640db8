//! Shared query parameter types for API handlers.

use campus_core::aggregation::ProgressScope;
use campus_core::types::EntityId;
use serde::Deserialize;

/// Optional `?course_id=` filter on the student progress view.
#[derive(Debug, Default, Deserialize)]
pub struct ProgressScopeParams {
    pub course_id: Option<EntityId>,
}

impl ProgressScopeParams {
    pub fn scope(&self) -> ProgressScope {
        match self.course_id {
            Some(course_id) => ProgressScope::Course(course_id),
            None => ProgressScope::AllCourses,
        }
    }
}
