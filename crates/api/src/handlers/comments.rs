//! Handlers for blog comments: public submission and reads, admin
//! moderation.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use meridian_core::error::CoreError;
use meridian_core::form::is_valid_email;
use meridian_core::guest::validate_guest_id;
use meridian_core::status::validate_comment_status;
use meridian_core::types::DbId;
use meridian_db::models::comment::{Comment, CreateComment};
use meridian_db::repositories::{BlogRepo, CommentRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::state::AppState;

/// Longest accepted comment body.
const MAX_COMMENT_LEN: usize = 5_000;

/// Query parameters for the moderation list.
#[derive(Debug, Deserialize)]
pub struct ModerationListParams {
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Request body for the moderation update.
#[derive(Debug, Deserialize)]
pub struct ModerateCommentRequest {
    pub status: String,
}

// ---------------------------------------------------------------------------
// Public
// ---------------------------------------------------------------------------

/// GET /api/blogs/{slug}/comments
///
/// Approved comments of a published post, oldest first.
pub async fn list_for_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<Vec<Comment>>> {
    let post = BlogRepo::find_by_slug(&state.pool, &slug, true)
        .await?
        .ok_or(AppError::Core(CoreError::not_found_slug(
            "Blog post",
            &slug,
        )))?;
    let comments = CommentRepo::list_approved_for_post(&state.pool, post.id).await?;
    Ok(Json(comments))
}

/// POST /api/blogs/{slug}/comments
///
/// Submit a comment. It lands as `pending` and is not served publicly
/// until a moderator approves it.
pub async fn create(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(input): Json<CreateComment>,
) -> AppResult<(StatusCode, Json<Comment>)> {
    if input.author_name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Please fill in your name".into(),
        )));
    }
    if input.body.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Comment must not be empty".into(),
        )));
    }
    if input.body.len() > MAX_COMMENT_LEN {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Comment must be at most {MAX_COMMENT_LEN} characters"
        ))));
    }
    if let Some(email) = &input.author_email {
        if !email.trim().is_empty() && !is_valid_email(email.trim()) {
            return Err(AppError::Core(CoreError::Validation(
                "Please enter a valid email address".into(),
            )));
        }
    }
    if let Some(guest_id) = &input.guest_id {
        validate_guest_id(guest_id).map_err(CoreError::Validation)?;
    }

    let post = BlogRepo::find_by_slug(&state.pool, &slug, true)
        .await?
        .ok_or(AppError::Core(CoreError::not_found_slug(
            "Blog post",
            &slug,
        )))?;

    let comment = CommentRepo::create(&state.pool, post.id, &input).await?;
    tracing::info!(comment_id = comment.id, post_id = post.id, "comment submitted");
    Ok((StatusCode::CREATED, Json(comment)))
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

/// GET /admin/api/comments
///
/// Moderation queue, newest first, optional `?status=` filter.
pub async fn admin_list(
    RequireEditor(_editor): RequireEditor,
    State(state): State<AppState>,
    Query(params): Query<ModerationListParams>,
) -> AppResult<Json<Vec<Comment>>> {
    if let Some(status) = &params.status {
        validate_comment_status(status).map_err(CoreError::Validation)?;
    }
    let comments = CommentRepo::list_for_moderation(
        &state.pool,
        params.status.as_deref(),
        params.limit,
        params.offset,
    )
    .await?;
    Ok(Json(comments))
}

/// PATCH /admin/api/comments/{id}
///
/// Approve or reject a comment.
pub async fn admin_moderate(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ModerateCommentRequest>,
) -> AppResult<Json<Comment>> {
    validate_comment_status(&input.status).map_err(CoreError::Validation)?;

    let comment = CommentRepo::set_status(&state.pool, id, &input.status)
        .await?
        .ok_or(AppError::Core(CoreError::not_found_id("Comment", id)))?;
    tracing::info!(
        comment_id = id,
        user_id = editor.user_id,
        status = %comment.status,
        "comment moderated"
    );
    Ok(Json(comment))
}

/// DELETE /admin/api/comments/{id}
pub async fn admin_delete(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = CommentRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(comment_id = id, user_id = editor.user_id, "comment deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found_id("Comment", id)))
    }
}
