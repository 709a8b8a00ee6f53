//! Handlers for `/api/auth`: login, token refresh, session lookup, logout.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use meridian_core::error::CoreError;
use meridian_db::models::session::CreateSession;
use meridian_db::models::user::UserResponse;
use meridian_db::repositories::{SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{
    issue_access_token, mint_refresh_token, refresh_expires_at, refresh_token_digest,
};
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Bad passwords in a row before the account locks.
const LOCKOUT_THRESHOLD: i32 = 5;

/// Lockout duration, minutes.
const LOCKOUT_MINS: i64 = 15;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /api/auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Token pair returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Seconds until `access_token` expires.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/login
///
/// Authenticate with email + password. Failed attempts are counted per
/// account; reaching [`LOCKOUT_THRESHOLD`] locks it for [`LOCKOUT_MINS`]
/// minutes.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = UserRepo::find_by_email(&state.pool, input.email.trim())
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
        })?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    if let Some(locked_until) = user.locked_until {
        if locked_until > Utc::now() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Account locked after repeated failures. Try again later.".into(),
            )));
        }
    }

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Could not verify password: {e}")))?;

    if !password_valid {
        let failures = UserRepo::note_failed_login(&state.pool, user.id).await?;
        if failures >= LOCKOUT_THRESHOLD {
            let until = Utc::now() + chrono::Duration::minutes(LOCKOUT_MINS);
            UserRepo::lock_until(&state.pool, user.id, until).await?;
            tracing::warn!(user_id = user.id, failures, "account locked after failed logins");
        }
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        )));
    }

    // Success clears the failure counter and any expired lock.
    UserRepo::record_login(&state.pool, user.id).await?;

    let response = issue_tokens(&state, user).await?;
    Ok(Json(response))
}

/// POST /api/auth/refresh
///
/// Exchange a valid refresh token for a new token pair. The used session
/// is revoked so each refresh token works exactly once.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let digest = refresh_token_digest(&input.refresh_token);

    let session = SessionRepo::find_live_by_digest(&state.pool, &digest)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    SessionRepo::revoke(&state.pool, session.id).await?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Account no longer exists".into())))?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let response = issue_tokens(&state, user).await?;
    Ok(Json(response))
}

/// GET /api/auth/session
///
/// Return the profile of the authenticated user. The admin frontend calls
/// this on startup to restore a session from a stored access token.
pub async fn session(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Account no longer exists".into())))?;
    Ok(Json(user.into()))
}

/// POST /api/auth/logout
///
/// Revoke every session for the authenticated user. Returns 204.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    SessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate a token pair, persist the refresh session, build the response.
async fn issue_tokens(
    state: &AppState,
    user: meridian_db::models::user::User,
) -> AppResult<AuthResponse> {
    let access_token = issue_access_token(user.id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Could not sign access token: {e}")))?;

    let refresh = mint_refresh_token();
    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_digest: refresh.digest,
            expires_at: refresh_expires_at(&state.config.jwt),
        },
    )
    .await?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh.plaintext,
        expires_in: state.config.jwt.access_ttl_mins * 60,
        user: user.into(),
    })
}
