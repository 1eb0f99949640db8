//! Route definitions for the `/courses` resource.
//!
//! Catalog administration plus the per-course student operations
//! (enrollment and grading).

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{catalog, enrollment, scores};
use crate::state::AppState;

/// Routes mounted at `/courses`.
///
/// ```text
/// POST   /                                              -> create_course
/// GET    /{course_id}                                   -> get_course
/// POST   /{course_id}/subjects                          -> create_subject
/// GET    /{course_id}/subjects/{subject_id}/items       -> list_items
/// POST   /{course_id}/subjects/{subject_id}/assignments -> create_assignment
/// POST   /{course_id}/subjects/{subject_id}/projects    -> create_project
/// PUT    /{course_id}/enrollments/{user_id}             -> enroll
/// DELETE /{course_id}/enrollments/{user_id}             -> unenroll
/// POST   /{course_id}/students/{user_id}/scores         -> scores::apply
/// ```
pub fn router() -> Router<AppState> {
    let subject_routes = Router::new()
        .route("/", post(catalog::create_subject))
        .route("/{subject_id}/items", get(catalog::list_items))
        .route("/{subject_id}/assignments", post(catalog::create_assignment))
        .route("/{subject_id}/projects", post(catalog::create_project));

    Router::new()
        .route("/", post(catalog::create_course))
        .route("/{course_id}", get(catalog::get_course))
        .nest("/{course_id}/subjects", subject_routes)
        .route(
            "/{course_id}/enrollments/{user_id}",
            put(enrollment::enroll).delete(enrollment::unenroll),
        )
        .route("/{course_id}/students/{user_id}/scores", post(scores::apply))
}
