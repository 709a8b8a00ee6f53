//! Handlers for competitions and their application forms.
//!
//! The form document is owned by the competition row and replaced
//! wholesale through its own save endpoint; competition CRUD never
//! touches it. Submissions live in [`crate::handlers::applications`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use meridian_core::error::CoreError;
use meridian_core::form::{render_plan, ApplicationFormConfig, RenderedField};
use meridian_core::slug::resolve_slug;
use meridian_core::types::DbId;
use meridian_db::models::competition::{Competition, CreateCompetition, UpdateCompetition};
use meridian_db::repositories::CompetitionRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::state::AppState;

/// Response body for `GET /api/competitions/{slug}/form`.
///
/// Carries the raw config and its derived render plan so clients never
/// re-implement the field-type mapping. A disabled form is served as the
/// empty default config with an empty plan.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionFormResponse {
    pub config: ApplicationFormConfig,
    pub render_plan: Vec<RenderedField>,
}

// ---------------------------------------------------------------------------
// Public
// ---------------------------------------------------------------------------

/// GET /api/competitions
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Competition>>> {
    let competitions = CompetitionRepo::list(&state.pool, true).await?;
    Ok(Json(competitions))
}

/// GET /api/competitions/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<Competition>> {
    let competition = CompetitionRepo::find_by_slug(&state.pool, &slug, true)
        .await?
        .ok_or(AppError::Core(CoreError::not_found_slug(
            "Competition",
            &slug,
        )))?;
    Ok(Json(competition))
}

/// GET /api/competitions/{slug}/form
///
/// Form config plus render plan for the public application page. When the
/// form is disabled the stored fields are not revealed; callers get the
/// empty disabled config and can tell "applications closed" apart from a
/// missing competition (404).
pub async fn get_form(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<CompetitionFormResponse>> {
    let competition = CompetitionRepo::find_by_slug(&state.pool, &slug, true)
        .await?
        .ok_or(AppError::Core(CoreError::not_found_slug(
            "Competition",
            &slug,
        )))?;

    let config = competition
        .form_config()
        .map_err(|e| AppError::InternalError(format!("Stored form document is invalid: {e}")))?;

    if !config.enabled {
        return Ok(Json(CompetitionFormResponse {
            config: ApplicationFormConfig::default(),
            render_plan: Vec::new(),
        }));
    }

    let plan = render_plan(&config);
    Ok(Json(CompetitionFormResponse {
        config,
        render_plan: plan,
    }))
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

/// GET /admin/api/competitions
pub async fn admin_list(
    RequireEditor(_editor): RequireEditor,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Competition>>> {
    let competitions = CompetitionRepo::list(&state.pool, false).await?;
    Ok(Json(competitions))
}

/// GET /admin/api/competitions/{id}
pub async fn admin_get(
    RequireEditor(_editor): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Competition>> {
    let competition = CompetitionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found_id("Competition", id)))?;
    Ok(Json(competition))
}

/// POST /admin/api/competitions
///
/// New competitions start with the empty disabled form document.
pub async fn admin_create(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<CreateCompetition>,
) -> AppResult<(StatusCode, Json<Competition>)> {
    let slug = resolve_slug(input.slug.as_deref(), &input.title)?;
    let competition = CompetitionRepo::create(&state.pool, &slug, &input).await?;
    tracing::info!(
        competition_id = competition.id,
        user_id = editor.user_id,
        "competition created"
    );
    Ok((StatusCode::CREATED, Json(competition)))
}

/// PUT /admin/api/competitions/{id}
pub async fn admin_update(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCompetition>,
) -> AppResult<Json<Competition>> {
    if let Some(slug) = &input.slug {
        meridian_core::slug::validate_slug(slug)?;
    }
    let competition = CompetitionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::not_found_id("Competition", id)))?;
    tracing::info!(competition_id = id, user_id = editor.user_id, "competition updated");
    Ok(Json(competition))
}

/// PUT /admin/api/competitions/{id}/form
///
/// Wholesale replace of the application form document. The incoming
/// config is normalized (options exist iff the field is a select) and
/// checked for duplicate field ids before it is persisted.
pub async fn admin_save_form(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut config): Json<ApplicationFormConfig>,
) -> AppResult<Json<Competition>> {
    config.normalize();
    config.check_invariants()?;

    let document = serde_json::to_value(&config)
        .map_err(|e| AppError::InternalError(format!("Form serialization error: {e}")))?;

    let competition = CompetitionRepo::save_form(&state.pool, id, &document)
        .await?
        .ok_or(AppError::Core(CoreError::not_found_id("Competition", id)))?;
    tracing::info!(
        competition_id = id,
        user_id = editor.user_id,
        field_count = config.fields.len(),
        enabled = config.enabled,
        "application form saved"
    );
    Ok(Json(competition))
}

/// DELETE /admin/api/competitions/{id}
pub async fn admin_delete(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = CompetitionRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(competition_id = id, user_id = editor.user_id, "competition deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found_id("Competition", id)))
    }
}
