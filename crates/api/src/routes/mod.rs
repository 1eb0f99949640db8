pub mod courses;
pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /courses                                              create
/// /courses/{course_id}                                  get with subjects
/// /courses/{course_id}/subjects                         add subject
/// /courses/{course_id}/subjects/{subject_id}/items      list definitions
/// /courses/{course_id}/subjects/{subject_id}/assignments  add assignment
/// /courses/{course_id}/subjects/{subject_id}/projects   add project
/// /courses/{course_id}/enrollments/{user_id}            enroll (PUT), unenroll (DELETE)
/// /courses/{course_id}/students/{user_id}/scores        apply grading form (POST)
///
/// /users                                                create
/// /users/{user_id}                                      full record
/// /users/{user_id}/progress                             progress view (?course_id=)
/// /users/{user_id}/subjects/{subject_id}/attendance     record attendance (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/courses", courses::router())
        .nest("/users", users::router())
}
