//! Handlers for programme areas and programmes.
//!
//! Public routes are slug-addressed and only show published rows; the
//! admin routes are id-addressed and operate on everything.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use meridian_core::error::CoreError;
use meridian_core::slug::resolve_slug;
use meridian_core::types::DbId;
use meridian_db::models::programme::{
    CreateProgramme, CreateProgrammeArea, Programme, ProgrammeArea, UpdateProgramme,
    UpdateProgrammeArea,
};
use meridian_db::repositories::{ProgrammeAreaRepo, ProgrammeRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::state::AppState;

/// Query parameters for the public programme list.
#[derive(Debug, Deserialize)]
pub struct ProgrammeListParams {
    /// Filter to programmes under the area with this slug.
    pub area: Option<String>,
}

// ---------------------------------------------------------------------------
// Public: programme areas
// ---------------------------------------------------------------------------

/// GET /api/programme-areas
pub async fn list_areas(State(state): State<AppState>) -> AppResult<Json<Vec<ProgrammeArea>>> {
    let areas = ProgrammeAreaRepo::list(&state.pool, true).await?;
    Ok(Json(areas))
}

/// GET /api/programme-areas/{slug}
pub async fn get_area_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<ProgrammeArea>> {
    let area = ProgrammeAreaRepo::find_by_slug(&state.pool, &slug, true)
        .await?
        .ok_or(AppError::Core(CoreError::not_found_slug(
            "Programme area",
            &slug,
        )))?;
    Ok(Json(area))
}

// ---------------------------------------------------------------------------
// Public: programmes
// ---------------------------------------------------------------------------

/// GET /api/programmes
///
/// Published programmes, optionally restricted to one area via `?area=<slug>`.
pub async fn list_programmes(
    State(state): State<AppState>,
    Query(params): Query<ProgrammeListParams>,
) -> AppResult<Json<Vec<Programme>>> {
    let area_id = match &params.area {
        Some(area_slug) => {
            let area = ProgrammeAreaRepo::find_by_slug(&state.pool, area_slug, true)
                .await?
                .ok_or(AppError::Core(CoreError::not_found_slug(
                    "Programme area",
                    area_slug,
                )))?;
            Some(area.id)
        }
        None => None,
    };
    let programmes = ProgrammeRepo::list(&state.pool, area_id, true).await?;
    Ok(Json(programmes))
}

/// GET /api/programmes/{slug}
pub async fn get_programme_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<Programme>> {
    let programme = ProgrammeRepo::find_by_slug(&state.pool, &slug, true)
        .await?
        .ok_or(AppError::Core(CoreError::not_found_slug(
            "Programme", &slug,
        )))?;
    Ok(Json(programme))
}

// ---------------------------------------------------------------------------
// Admin: programme areas
// ---------------------------------------------------------------------------

/// GET /admin/api/programme-areas
pub async fn admin_list_areas(
    RequireEditor(_editor): RequireEditor,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ProgrammeArea>>> {
    let areas = ProgrammeAreaRepo::list(&state.pool, false).await?;
    Ok(Json(areas))
}

/// GET /admin/api/programme-areas/{id}
pub async fn admin_get_area(
    RequireEditor(_editor): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProgrammeArea>> {
    let area = ProgrammeAreaRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found_id(
            "Programme area",
            id,
        )))?;
    Ok(Json(area))
}

/// POST /admin/api/programme-areas
pub async fn admin_create_area(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<CreateProgrammeArea>,
) -> AppResult<(StatusCode, Json<ProgrammeArea>)> {
    let slug = resolve_slug(input.slug.as_deref(), &input.title)?;
    let area = ProgrammeAreaRepo::create(&state.pool, &slug, &input).await?;
    tracing::info!(area_id = area.id, user_id = editor.user_id, "programme area created");
    Ok((StatusCode::CREATED, Json(area)))
}

/// PUT /admin/api/programme-areas/{id}
pub async fn admin_update_area(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProgrammeArea>,
) -> AppResult<Json<ProgrammeArea>> {
    if let Some(slug) = &input.slug {
        meridian_core::slug::validate_slug(slug)?;
    }
    let area = ProgrammeAreaRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::not_found_id(
            "Programme area",
            id,
        )))?;
    tracing::info!(area_id = id, user_id = editor.user_id, "programme area updated");
    Ok(Json(area))
}

/// DELETE /admin/api/programme-areas/{id}
pub async fn admin_delete_area(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ProgrammeAreaRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(area_id = id, user_id = editor.user_id, "programme area deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found_id(
            "Programme area",
            id,
        )))
    }
}

// ---------------------------------------------------------------------------
// Admin: programmes
// ---------------------------------------------------------------------------

/// GET /admin/api/programmes
pub async fn admin_list_programmes(
    RequireEditor(_editor): RequireEditor,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Programme>>> {
    let programmes = ProgrammeRepo::list(&state.pool, None, false).await?;
    Ok(Json(programmes))
}

/// GET /admin/api/programmes/{id}
pub async fn admin_get_programme(
    RequireEditor(_editor): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Programme>> {
    let programme = ProgrammeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found_id("Programme", id)))?;
    Ok(Json(programme))
}

/// POST /admin/api/programmes
pub async fn admin_create_programme(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<CreateProgramme>,
) -> AppResult<(StatusCode, Json<Programme>)> {
    // The parent area must exist; a dangling FK would surface as a 500.
    ProgrammeAreaRepo::find_by_id(&state.pool, input.area_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found_id(
            "Programme area",
            input.area_id,
        )))?;

    let slug = resolve_slug(input.slug.as_deref(), &input.title)?;
    let programme = ProgrammeRepo::create(&state.pool, &slug, &input).await?;
    tracing::info!(
        programme_id = programme.id,
        user_id = editor.user_id,
        "programme created"
    );
    Ok((StatusCode::CREATED, Json(programme)))
}

/// PUT /admin/api/programmes/{id}
pub async fn admin_update_programme(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProgramme>,
) -> AppResult<Json<Programme>> {
    if let Some(slug) = &input.slug {
        meridian_core::slug::validate_slug(slug)?;
    }
    if let Some(area_id) = input.area_id {
        ProgrammeAreaRepo::find_by_id(&state.pool, area_id)
            .await?
            .ok_or(AppError::Core(CoreError::not_found_id(
                "Programme area",
                area_id,
            )))?;
    }
    let programme = ProgrammeRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::not_found_id("Programme", id)))?;
    tracing::info!(programme_id = id, user_id = editor.user_id, "programme updated");
    Ok(Json(programme))
}

/// DELETE /admin/api/programmes/{id}
pub async fn admin_delete_programme(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ProgrammeRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(programme_id = id, user_id = editor.user_id, "programme deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found_id("Programme", id)))
    }
}
