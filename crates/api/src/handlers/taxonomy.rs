//! Handlers for tags and categories.
//!
//! Both vocabularies are readable publicly (the blog filter UI needs
//! them) and writable only through the admin routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use meridian_core::error::CoreError;
use meridian_core::slug::resolve_slug;
use meridian_core::types::DbId;
use meridian_db::models::taxonomy::{
    Category, CreateCategory, CreateTag, Tag, UpdateCategory, UpdateTag,
};
use meridian_db::repositories::{CategoryRepo, TagRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Public
// ---------------------------------------------------------------------------

/// GET /api/tags
pub async fn list_tags(State(state): State<AppState>) -> AppResult<Json<Vec<Tag>>> {
    let tags = TagRepo::list(&state.pool).await?;
    Ok(Json(tags))
}

/// GET /api/categories
pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<Vec<Category>>> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(categories))
}

// ---------------------------------------------------------------------------
// Admin: tags
// ---------------------------------------------------------------------------

/// POST /admin/api/tags
pub async fn admin_create_tag(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<CreateTag>,
) -> AppResult<(StatusCode, Json<Tag>)> {
    let slug = resolve_slug(input.slug.as_deref(), &input.name)?;
    let tag = TagRepo::create(&state.pool, &slug, &input).await?;
    tracing::info!(tag_id = tag.id, user_id = editor.user_id, "tag created");
    Ok((StatusCode::CREATED, Json(tag)))
}

/// PUT /admin/api/tags/{id}
pub async fn admin_update_tag(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTag>,
) -> AppResult<Json<Tag>> {
    if let Some(slug) = &input.slug {
        meridian_core::slug::validate_slug(slug)?;
    }
    let tag = TagRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::not_found_id("Tag", id)))?;
    tracing::info!(tag_id = id, user_id = editor.user_id, "tag updated");
    Ok(Json(tag))
}

/// DELETE /admin/api/tags/{id}
pub async fn admin_delete_tag(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = TagRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(tag_id = id, user_id = editor.user_id, "tag deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found_id("Tag", id)))
    }
}

// ---------------------------------------------------------------------------
// Admin: categories
// ---------------------------------------------------------------------------

/// POST /admin/api/categories
pub async fn admin_create_category(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<CreateCategory>,
) -> AppResult<(StatusCode, Json<Category>)> {
    let slug = resolve_slug(input.slug.as_deref(), &input.name)?;
    let category = CategoryRepo::create(&state.pool, &slug, &input).await?;
    tracing::info!(category_id = category.id, user_id = editor.user_id, "category created");
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /admin/api/categories/{id}
pub async fn admin_update_category(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<Json<Category>> {
    if let Some(slug) = &input.slug {
        meridian_core::slug::validate_slug(slug)?;
    }
    let category = CategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::not_found_id("Category", id)))?;
    tracing::info!(category_id = id, user_id = editor.user_id, "category updated");
    Ok(Json(category))
}

/// DELETE /admin/api/categories/{id}
pub async fn admin_delete_category(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = CategoryRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(category_id = id, user_id = editor.user_id, "category deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found_id("Category", id)))
    }
}
