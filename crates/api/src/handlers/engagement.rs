//! Handlers for the per-post engagement counters (views and likes).
//!
//! All four endpoints are public and keyed by the post slug. Responses
//! always carry the authoritative server-side count; clients replace
//! their local state with it rather than extrapolating.

use axum::extract::{Path, Query, State};
use axum::Json;
use meridian_core::error::CoreError;
use meridian_core::guest::validate_guest_id;
use meridian_db::models::blog::BlogPost;
use meridian_db::models::engagement::{LikeState, ViewCount};
use meridian_db::repositories::{BlogRepo, EngagementRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for `POST /api/blogs/{slug}/views`. The whole body is
/// optional; anonymous views count without deduplication.
#[derive(Debug, Default, Deserialize)]
pub struct ViewRequest {
    pub guest_id: Option<String>,
}

/// Request body for `POST /api/blogs/{slug}/like`.
#[derive(Debug, Deserialize)]
pub struct LikeRequest {
    pub guest_id: String,
}

/// Query parameters for `GET /api/blogs/{slug}/like`.
#[derive(Debug, Deserialize)]
pub struct LikeStateParams {
    pub guest_id: Option<String>,
}

/// Resolve a published post by slug or 404.
async fn published_post(state: &AppState, slug: &str) -> AppResult<BlogPost> {
    BlogRepo::find_by_slug(&state.pool, slug, true)
        .await?
        .ok_or(AppError::Core(CoreError::not_found_slug("Blog post", slug)))
}

/// GET /api/blogs/{slug}/views
pub async fn get_views(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<ViewCount>> {
    let post = published_post(&state, &slug).await?;
    let views = EngagementRepo::view_count(&state.pool, post.id).await?;
    Ok(Json(ViewCount { views }))
}

/// POST /api/blogs/{slug}/views
///
/// Count one view and return the authoritative total. With a guest id,
/// repeat views inside the configured window are suppressed; the total
/// is returned either way.
pub async fn record_view(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    body: Option<Json<ViewRequest>>,
) -> AppResult<Json<ViewCount>> {
    let input = body.map(|Json(b)| b).unwrap_or_default();
    if let Some(guest_id) = &input.guest_id {
        validate_guest_id(guest_id).map_err(CoreError::Validation)?;
    }

    let post = published_post(&state, &slug).await?;
    let views = EngagementRepo::record_view(
        &state.pool,
        post.id,
        input.guest_id.as_deref(),
        state.config.view_dedup_window_secs,
    )
    .await?;
    Ok(Json(ViewCount { views }))
}

/// GET /api/blogs/{slug}/like
///
/// Like count plus whether `?guest_id=` currently likes the post.
/// Without a guest id, `is_liked` is always false.
pub async fn get_like_state(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<LikeStateParams>,
) -> AppResult<Json<LikeState>> {
    if let Some(guest_id) = &params.guest_id {
        validate_guest_id(guest_id).map_err(CoreError::Validation)?;
    }

    let post = published_post(&state, &slug).await?;
    let like_state =
        EngagementRepo::like_state(&state.pool, post.id, params.guest_id.as_deref()).await?;
    Ok(Json(like_state))
}

/// POST /api/blogs/{slug}/like
///
/// Idempotent toggle: the first call likes, the second unlikes. Returns
/// the resulting state as a full replacement for client-side state.
pub async fn toggle_like(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(input): Json<LikeRequest>,
) -> AppResult<Json<LikeState>> {
    validate_guest_id(&input.guest_id).map_err(CoreError::Validation)?;

    let post = published_post(&state, &slug).await?;
    let like_state = EngagementRepo::toggle_like(&state.pool, post.id, &input.guest_id).await?;
    Ok(Json(like_state))
}
