//! Handlers for blog posts.
//!
//! Engagement counters (views/likes) have their own handlers in
//! [`crate::handlers::engagement`]; `view_count` still rides along on
//! the post row for list rendering.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use meridian_core::error::CoreError;
use meridian_core::slug::resolve_slug;
use meridian_core::types::DbId;
use meridian_db::models::blog::{BlogListParams, BlogPost, CreateBlogPost, UpdateBlogPost};
use meridian_db::models::taxonomy::Tag;
use meridian_db::repositories::BlogRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::state::AppState;

/// A post with its tag list, returned by single-post endpoints.
#[derive(Debug, Serialize)]
pub struct BlogPostDetail {
    #[serde(flatten)]
    pub post: BlogPost,
    pub tags: Vec<Tag>,
}

async fn with_tags(state: &AppState, post: BlogPost) -> AppResult<BlogPostDetail> {
    let tags = BlogRepo::tags_for_post(&state.pool, post.id).await?;
    Ok(BlogPostDetail { post, tags })
}

// ---------------------------------------------------------------------------
// Public
// ---------------------------------------------------------------------------

/// GET /api/blogs
///
/// Published posts newest first; `?category=<slug>`, `?tag=<slug>`,
/// `?limit`, `?offset`.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<BlogListParams>,
) -> AppResult<Json<Vec<BlogPost>>> {
    let posts = BlogRepo::list_published(&state.pool, &params).await?;
    Ok(Json(posts))
}

/// GET /api/blogs/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<BlogPostDetail>> {
    let post = BlogRepo::find_by_slug(&state.pool, &slug, true)
        .await?
        .ok_or(AppError::Core(CoreError::not_found_slug(
            "Blog post",
            &slug,
        )))?;
    Ok(Json(with_tags(&state, post).await?))
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

/// GET /admin/api/blogs
pub async fn admin_list(
    RequireEditor(_editor): RequireEditor,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<BlogPost>>> {
    let posts = BlogRepo::list_all(&state.pool).await?;
    Ok(Json(posts))
}

/// GET /admin/api/blogs/{id}
pub async fn admin_get(
    RequireEditor(_editor): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<BlogPostDetail>> {
    let post = BlogRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found_id("Blog post", id)))?;
    Ok(Json(with_tags(&state, post).await?))
}

/// POST /admin/api/blogs
pub async fn admin_create(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<CreateBlogPost>,
) -> AppResult<(StatusCode, Json<BlogPostDetail>)> {
    let slug = resolve_slug(input.slug.as_deref(), &input.title)?;
    let post = BlogRepo::create(&state.pool, &slug, &input).await?;
    tracing::info!(post_id = post.id, user_id = editor.user_id, "blog post created");
    let detail = with_tags(&state, post).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// PUT /admin/api/blogs/{id}
pub async fn admin_update(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBlogPost>,
) -> AppResult<Json<BlogPostDetail>> {
    if let Some(slug) = &input.slug {
        meridian_core::slug::validate_slug(slug)?;
    }
    let post = BlogRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::not_found_id("Blog post", id)))?;
    tracing::info!(post_id = id, user_id = editor.user_id, "blog post updated");
    Ok(Json(with_tags(&state, post).await?))
}

/// DELETE /admin/api/blogs/{id}
pub async fn admin_delete(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = BlogRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(post_id = id, user_id = editor.user_id, "blog post deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found_id("Blog post", id)))
    }
}
