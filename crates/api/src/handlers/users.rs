//! Handlers for back-office user management.
//!
//! Everything here requires the `admin` role; editors manage content,
//! never accounts.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use meridian_core::error::CoreError;
use meridian_core::roles::validate_role;
use meridian_core::types::DbId;
use meridian_db::models::user::{CreateUser, UpdateUser, UserResponse};
use meridian_db::repositories::{SessionRepo, UserRepo};
use serde::Deserialize;
use validator::Validate;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Shortest password accepted when creating accounts or resetting.
const PASSWORD_MIN_LEN: usize = 12;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/api/users`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 120, message = "name must be 1-120 characters"))]
    pub name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    pub password: String,
    pub role: String,
}

/// Request body for `PUT /admin/api/users/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 120, message = "name must be 1-120 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

/// Request body for `POST /admin/api/users/{id}/reset-password`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

/// Flatten `validator` errors into one human-readable line.
fn check(input: &impl Validate) -> Result<(), AppError> {
    input.validate().map_err(|errors| {
        let message = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => format!("{field}: {msg}"),
                    None => format!("{field}: invalid value"),
                })
            })
            .collect::<Vec<_>>()
            .join("; ");
        AppError::Core(CoreError::Validation(message))
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /admin/api/users
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    check(&input)?;
    validate_role(&input.role).map_err(CoreError::Validation)?;
    validate_password_strength(&input.password, PASSWORD_MIN_LEN)
        .map_err(CoreError::Validation)?;

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Could not hash password: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name: input.name,
            email: input.email.trim().to_lowercase(),
            password_hash: hashed,
            role: input.role,
        },
    )
    .await?;

    tracing::info!(created_id = user.id, user_id = admin.user_id, "user created");
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /admin/api/users
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// GET /admin/api/users/{id}
pub async fn get(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found_id("User", id)))?;
    Ok(Json(user.into()))
}

/// PUT /admin/api/users/{id}
///
/// Update profile fields and role; passwords have their own endpoint.
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    check(&input)?;
    if let Some(role) = &input.role {
        validate_role(role).map_err(CoreError::Validation)?;
    }

    let user = UserRepo::update(
        &state.pool,
        id,
        &UpdateUser {
            name: input.name,
            email: input.email.map(|e| e.trim().to_lowercase()),
            role: input.role,
            is_active: input.is_active,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::not_found_id("User", id)))?;

    tracing::info!(updated_id = id, user_id = admin.user_id, "user updated");
    Ok(Json(user.into()))
}

/// DELETE /admin/api/users/{id}
///
/// Soft-deactivate: the row stays for audit, logins stop working and
/// every open session is revoked.
pub async fn deactivate(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deactivated = UserRepo::deactivate(&state.pool, id).await?;
    if deactivated {
        SessionRepo::revoke_all_for_user(&state.pool, id).await?;
        tracing::info!(deactivated_id = id, user_id = admin.user_id, "user deactivated");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found_id("User", id)))
    }
}

/// POST /admin/api/users/{id}/reset-password
pub async fn reset_password(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    validate_password_strength(&input.new_password, PASSWORD_MIN_LEN)
        .map_err(CoreError::Validation)?;

    let hashed = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Could not hash password: {e}")))?;

    let updated = UserRepo::update_password(&state.pool, id, &hashed).await?;
    if updated {
        // A reset invalidates anything issued under the old password.
        SessionRepo::revoke_all_for_user(&state.pool, id).await?;
        tracing::info!(reset_id = id, user_id = admin.user_id, "password reset");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found_id("User", id)))
    }
}
