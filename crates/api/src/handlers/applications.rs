//! Handlers for competition application submissions.
//!
//! The public apply endpoint is the only way a submission is created. It
//! re-runs the form validator against the schema stored on the
//! competition row, so a stale or hand-crafted client payload can never
//! slip past the rules an applicant saw in the browser. Review updates
//! and the moderation list are the only mutations afterwards.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use meridian_core::error::CoreError;
use meridian_core::form::{is_valid_email, is_valid_phone, validate_answers, AnswerMap};
use meridian_core::status::validate_submission_status;
use meridian_core::types::DbId;
use meridian_db::models::application::{Application, CreateApplication, UpdateApplicationReview};
use meridian_db::repositories::{ApplicationRepo, CompetitionRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/competitions/apply`.
#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    pub competition_id: DbId,
    pub applicant_name: String,
    pub applicant_email: String,
    pub applicant_phone: String,
    /// Field id → answer, keyed by the schema the applicant saw.
    #[serde(default)]
    pub form_data: AnswerMap,
}

/// Query parameters for the admin submission list.
#[derive(Debug, Deserialize)]
pub struct ApplicationListParams {
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Response body for the admin submission list.
#[derive(Debug, Serialize)]
pub struct ApplicationListResponse {
    pub applications: Vec<Application>,
    pub total: i64,
}

// ---------------------------------------------------------------------------
// Public
// ---------------------------------------------------------------------------

/// POST /api/competitions/apply
///
/// Validate and store one submission. Order of checks: competition must
/// exist and be published, its form must be enabled, the fixed identity
/// triple must be present and well-formed, every answer must pass the
/// schema validator, and no answer may reference an unknown field id.
/// Nothing is persisted unless every check passes.
pub async fn apply(
    State(state): State<AppState>,
    Json(input): Json<ApplyRequest>,
) -> AppResult<(StatusCode, Json<Application>)> {
    let competition = CompetitionRepo::find_by_id(&state.pool, input.competition_id)
        .await?
        .filter(|c| c.is_published)
        .ok_or(AppError::Core(CoreError::not_found_id(
            "Competition",
            input.competition_id,
        )))?;

    let config = competition
        .form_config()
        .map_err(|e| AppError::InternalError(format!("Stored form document is invalid: {e}")))?;

    if !config.enabled {
        return Err(AppError::Core(CoreError::Validation(
            "Applications are not open for this competition".into(),
        )));
    }

    validate_identity_triple(&input)?;

    if let Err(e) = validate_answers(&config.fields, &input.form_data) {
        return Err(AppError::Core(CoreError::Validation(e.message)));
    }

    // Answers may only reference fields that exist in the schema right
    // now; submissions are not migrated when the schema later changes.
    for key in input.form_data.keys() {
        if config.field_index(key).is_none() {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown form field: {key}"
            ))));
        }
    }

    let application = ApplicationRepo::create(
        &state.pool,
        &CreateApplication {
            competition_id: competition.id,
            applicant_name: input.applicant_name.trim().to_string(),
            applicant_email: input.applicant_email.trim().to_string(),
            applicant_phone: input.applicant_phone.trim().to_string(),
            form_data: serde_json::Value::Object(input.form_data),
        },
    )
    .await?;

    tracing::info!(
        application_id = application.id,
        competition_id = competition.id,
        "application submitted"
    );
    Ok((StatusCode::CREATED, Json(application)))
}

/// PATCH /api/competitions/{slug}/applications
///
/// Review update: set status and/or notes on one submission. The
/// submission must belong to the competition named in the path.
pub async fn review(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(input): Json<UpdateApplicationReview>,
) -> AppResult<Json<Application>> {
    let competition = CompetitionRepo::find_by_slug(&state.pool, &slug, false)
        .await?
        .ok_or(AppError::Core(CoreError::not_found_slug(
            "Competition",
            &slug,
        )))?;

    if let Some(status) = &input.status {
        validate_submission_status(status).map_err(CoreError::Validation)?;
    }

    let existing = ApplicationRepo::find_by_id(&state.pool, input.application_id)
        .await?
        .filter(|a| a.competition_id == competition.id)
        .ok_or(AppError::Core(CoreError::not_found_id(
            "Application",
            input.application_id,
        )))?;

    let application = ApplicationRepo::update_review(
        &state.pool,
        existing.id,
        input.status.as_deref(),
        input.notes.as_deref(),
    )
    .await?
    .ok_or(AppError::Core(CoreError::not_found_id(
        "Application",
        input.application_id,
    )))?;

    tracing::info!(
        application_id = application.id,
        user_id = editor.user_id,
        status = %application.status,
        "application reviewed"
    );
    Ok(Json(application))
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

/// GET /admin/api/competitions/{slug}/applications
///
/// Submissions for one competition, newest first, with an optional
/// `?status=` filter and the unfiltered-total for pagination.
pub async fn admin_list(
    RequireEditor(_editor): RequireEditor,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<ApplicationListParams>,
) -> AppResult<Json<ApplicationListResponse>> {
    let competition = CompetitionRepo::find_by_slug(&state.pool, &slug, false)
        .await?
        .ok_or(AppError::Core(CoreError::not_found_slug(
            "Competition",
            &slug,
        )))?;

    if let Some(status) = &params.status {
        validate_submission_status(status).map_err(CoreError::Validation)?;
    }

    let applications = ApplicationRepo::list_for_competition(
        &state.pool,
        competition.id,
        params.status.as_deref(),
        params.limit,
        params.offset,
    )
    .await?;
    let total = ApplicationRepo::count_for_competition(&state.pool, competition.id).await?;

    Ok(Json(ApplicationListResponse {
        applications,
        total,
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The identity triple travels outside `form_data` and is checked with
/// the same rules the schema validator applies to its field types.
fn validate_identity_triple(input: &ApplyRequest) -> Result<(), AppError> {
    if input.applicant_name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Please fill in Name".into(),
        )));
    }
    let email = input.applicant_email.trim();
    if email.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Please fill in Email".into(),
        )));
    }
    if !is_valid_email(email) {
        return Err(AppError::Core(CoreError::Validation(
            "Please enter a valid email address for Email".into(),
        )));
    }
    let phone = input.applicant_phone.trim();
    if phone.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Please fill in Phone".into(),
        )));
    }
    if !is_valid_phone(phone) {
        return Err(AppError::Core(CoreError::Validation(
            "Please enter a valid phone number for Phone".into(),
        )));
    }
    Ok(())
}
