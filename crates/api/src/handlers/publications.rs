//! Handlers for publications (downloadable reports and documents).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use meridian_core::error::CoreError;
use meridian_core::slug::resolve_slug;
use meridian_core::types::DbId;
use meridian_db::models::publication::{CreatePublication, Publication, UpdatePublication};
use meridian_db::repositories::PublicationRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Public
// ---------------------------------------------------------------------------

/// GET /api/publications
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Publication>>> {
    let publications = PublicationRepo::list(&state.pool, true).await?;
    Ok(Json(publications))
}

/// GET /api/publications/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<Publication>> {
    let publication = PublicationRepo::find_by_slug(&state.pool, &slug, true)
        .await?
        .ok_or(AppError::Core(CoreError::not_found_slug(
            "Publication",
            &slug,
        )))?;
    Ok(Json(publication))
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

/// GET /admin/api/publications
pub async fn admin_list(
    RequireEditor(_editor): RequireEditor,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Publication>>> {
    let publications = PublicationRepo::list(&state.pool, false).await?;
    Ok(Json(publications))
}

/// GET /admin/api/publications/{id}
pub async fn admin_get(
    RequireEditor(_editor): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Publication>> {
    let publication = PublicationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found_id("Publication", id)))?;
    Ok(Json(publication))
}

/// POST /admin/api/publications
///
/// `file_url` is required: a publication without its document is not a
/// publication. Upload the file first, then create the record.
pub async fn admin_create(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<CreatePublication>,
) -> AppResult<(StatusCode, Json<Publication>)> {
    if input.file_url.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "file_url must not be empty".into(),
        )));
    }
    let slug = resolve_slug(input.slug.as_deref(), &input.title)?;
    let publication = PublicationRepo::create(&state.pool, &slug, &input).await?;
    tracing::info!(
        publication_id = publication.id,
        user_id = editor.user_id,
        "publication created"
    );
    Ok((StatusCode::CREATED, Json(publication)))
}

/// PUT /admin/api/publications/{id}
pub async fn admin_update(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePublication>,
) -> AppResult<Json<Publication>> {
    if let Some(slug) = &input.slug {
        meridian_core::slug::validate_slug(slug)?;
    }
    let publication = PublicationRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::not_found_id("Publication", id)))?;
    tracing::info!(publication_id = id, user_id = editor.user_id, "publication updated");
    Ok(Json(publication))
}

/// DELETE /admin/api/publications/{id}
pub async fn admin_delete(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = PublicationRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(publication_id = id, user_id = editor.user_id, "publication deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found_id("Publication", id)))
    }
}
