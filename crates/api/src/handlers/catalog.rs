//! Handlers for course, subject and item definition administration.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use campus_core::catalog::{
    validate_subject_code, validate_title, validate_total_points, validate_units,
    CourseWithSubjects, ItemKind,
};
use campus_core::error::CoreError;
use campus_core::store::CatalogStore;
use campus_core::types::EntityId;
use campus_db::models::course::{Course, CreateCourse};
use campus_db::models::subject::{CreateSubject, Subject};
use campus_db::models::subject_item::{CreateSubjectItem, SubjectItem};
use campus_db::repositories::{CourseRepo, SubjectItemRepo, SubjectRepo};
use campus_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Load a subject and check it belongs to `course_id`. A subject under a
/// different course is reported as not found.
async fn find_subject_in_course(
    pool: &DbPool,
    course_id: EntityId,
    subject_id: EntityId,
) -> AppResult<Subject> {
    SubjectRepo::find_by_id(pool, subject_id)
        .await?
        .filter(|s| s.course_id == course_id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Subject",
            id: subject_id,
        }))
}

/// POST /api/v1/courses
pub async fn create_course(
    State(state): State<AppState>,
    Json(input): Json<CreateCourse>,
) -> AppResult<(StatusCode, Json<DataResponse<Course>>)> {
    validate_title("title", &input.title)?;

    let course = CourseRepo::create(&state.pool, &input).await?;
    tracing::info!(course_id = %course.id, title = %course.title, "Course created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: course })))
}

/// GET /api/v1/courses/{course_id}
pub async fn get_course(
    State(state): State<AppState>,
    Path(course_id): Path<EntityId>,
) -> AppResult<Json<DataResponse<CourseWithSubjects>>> {
    let course = state
        .store()
        .get_course_with_subjects(course_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id: course_id,
        }))?;
    Ok(Json(DataResponse { data: course }))
}

/// POST /api/v1/courses/{course_id}/subjects
///
/// Students already enrolled in the course do not receive progress for the
/// new subject; progress is provisioned at enrollment time only.
pub async fn create_subject(
    State(state): State<AppState>,
    Path(course_id): Path<EntityId>,
    Json(input): Json<CreateSubject>,
) -> AppResult<(StatusCode, Json<DataResponse<Subject>>)> {
    validate_title("title", &input.title)?;
    validate_subject_code(&input.code)?;
    validate_units(input.units)?;

    CourseRepo::find_by_id(&state.pool, course_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id: course_id,
        }))?;

    let subject = SubjectRepo::create(&state.pool, course_id, &input).await?;
    tracing::info!(%course_id, subject_id = %subject.id, code = %subject.code, "Subject added");
    Ok((StatusCode::CREATED, Json(DataResponse { data: subject })))
}

/// GET /api/v1/courses/{course_id}/subjects/{subject_id}/items
pub async fn list_items(
    State(state): State<AppState>,
    Path((course_id, subject_id)): Path<(EntityId, EntityId)>,
) -> AppResult<Json<DataResponse<Vec<SubjectItem>>>> {
    find_subject_in_course(&state.pool, course_id, subject_id).await?;
    let items = SubjectItemRepo::list_by_subject(&state.pool, subject_id).await?;
    Ok(Json(DataResponse { data: items }))
}

async fn create_item(
    state: &AppState,
    course_id: EntityId,
    subject_id: EntityId,
    kind: ItemKind,
    input: &CreateSubjectItem,
) -> AppResult<SubjectItem> {
    validate_title("title", &input.title)?;
    validate_total_points(input.total_points)?;
    find_subject_in_course(&state.pool, course_id, subject_id).await?;

    let item = SubjectItemRepo::create(&state.pool, subject_id, kind, input).await?;
    tracing::info!(
        %course_id,
        %subject_id,
        item_id = %item.id,
        kind = kind.as_str(),
        total_points = item.total_points,
        "Item definition added",
    );
    Ok(item)
}

/// POST /api/v1/courses/{course_id}/subjects/{subject_id}/assignments
pub async fn create_assignment(
    State(state): State<AppState>,
    Path((course_id, subject_id)): Path<(EntityId, EntityId)>,
    Json(input): Json<CreateSubjectItem>,
) -> AppResult<(StatusCode, Json<DataResponse<SubjectItem>>)> {
    let item = create_item(&state, course_id, subject_id, ItemKind::Assignment, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// POST /api/v1/courses/{course_id}/subjects/{subject_id}/projects
pub async fn create_project(
    State(state): State<AppState>,
    Path((course_id, subject_id)): Path<(EntityId, EntityId)>,
    Json(input): Json<CreateSubjectItem>,
) -> AppResult<(StatusCode, Json<DataResponse<SubjectItem>>)> {
    let item = create_item(&state, course_id, subject_id, ItemKind::Project, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}
