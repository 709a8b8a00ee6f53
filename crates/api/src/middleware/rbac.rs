//! Role gates layered on top of [`AuthUser`].
//!
//! Handlers state their minimum role in the signature; anything below it
//! is refused with 403 before the handler body runs.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use meridian_core::error::CoreError;
use meridian_core::roles::{ROLE_ADMIN, ROLE_EDITOR};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticate, then check the claimed role against an allow list.
async fn authenticate_with_roles(
    parts: &mut Parts,
    state: &AppState,
    allowed: &[&str],
    denial: &str,
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    if !allowed.contains(&user.role.as_str()) {
        return Err(AppError::Core(CoreError::Forbidden(denial.into())));
    }
    Ok(user)
}

/// Admin-only gate. User administration endpoints use this.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = authenticate_with_roles(
            parts,
            state,
            &[ROLE_ADMIN],
            "This action needs administrator access",
        )
        .await?;
        Ok(RequireAdmin(user))
    }
}

/// Gate for content management: editors and admins pass. The whole back
/// office except user administration sits behind this.
pub struct RequireEditor(pub AuthUser);

impl FromRequestParts<AppState> for RequireEditor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = authenticate_with_roles(
            parts,
            state,
            &[ROLE_ADMIN, ROLE_EDITOR],
            "This action needs editor access",
        )
        .await?;
        Ok(RequireEditor(user))
    }
}
