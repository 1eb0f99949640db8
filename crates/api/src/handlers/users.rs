//! Handlers for the `/users` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use campus_core::error::CoreError;
use campus_core::store::UserDirectory;
use campus_core::types::EntityId;
use campus_core::user::{validate_email, validate_name, Role, User as UserRecord};
use campus_db::models::user::{CreateUser, User};
use campus_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/users
///
/// A duplicate email violates `uq_users_email` and is reported as 409.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<DataResponse<User>>)> {
    validate_name("first_name", &input.first_name)?;
    validate_name("last_name", &input.last_name)?;
    validate_email(&input.email)?;
    if let Some(role) = &input.role {
        Role::from_str_value(role).map_err(CoreError::Validation)?;
    }

    let user = UserRepo::create(&state.pool, &input).await?;
    tracing::info!(user_id = %user.id, role = %user.role, "User created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: user })))
}

/// GET /api/v1/users/{user_id}
///
/// Returns the full record: enrolled courses and raw subject progress.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(user_id): Path<EntityId>,
) -> AppResult<Json<DataResponse<UserRecord>>> {
    let user = state
        .store()
        .get_user(user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;
    Ok(Json(DataResponse { data: user }))
}
