//! Handlers for events.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use meridian_core::error::CoreError;
use meridian_core::slug::resolve_slug;
use meridian_core::types::DbId;
use meridian_db::models::event::{CreateEvent, Event, UpdateEvent};
use meridian_db::repositories::EventRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::state::AppState;

/// Query parameters for the public event list.
#[derive(Debug, Deserialize)]
pub struct EventListParams {
    /// When true, only events that have not yet started.
    #[serde(default)]
    pub upcoming: bool,
}

// ---------------------------------------------------------------------------
// Public
// ---------------------------------------------------------------------------

/// GET /api/events
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<EventListParams>,
) -> AppResult<Json<Vec<Event>>> {
    let events = EventRepo::list(&state.pool, true, params.upcoming).await?;
    Ok(Json(events))
}

/// GET /api/events/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<Event>> {
    let event = EventRepo::find_by_slug(&state.pool, &slug, true)
        .await?
        .ok_or(AppError::Core(CoreError::not_found_slug("Event", &slug)))?;
    Ok(Json(event))
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

/// GET /admin/api/events
pub async fn admin_list(
    RequireEditor(_editor): RequireEditor,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Event>>> {
    let events = EventRepo::list(&state.pool, false, false).await?;
    Ok(Json(events))
}

/// GET /admin/api/events/{id}
pub async fn admin_get(
    RequireEditor(_editor): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Event>> {
    let event = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found_id("Event", id)))?;
    Ok(Json(event))
}

/// POST /admin/api/events
pub async fn admin_create(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<CreateEvent>,
) -> AppResult<(StatusCode, Json<Event>)> {
    let slug = resolve_slug(input.slug.as_deref(), &input.title)?;
    let event = EventRepo::create(&state.pool, &slug, &input).await?;
    tracing::info!(event_id = event.id, user_id = editor.user_id, "event created");
    Ok((StatusCode::CREATED, Json(event)))
}

/// PUT /admin/api/events/{id}
pub async fn admin_update(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEvent>,
) -> AppResult<Json<Event>> {
    if let Some(slug) = &input.slug {
        meridian_core::slug::validate_slug(slug)?;
    }
    let event = EventRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::not_found_id("Event", id)))?;
    tracing::info!(event_id = id, user_id = editor.user_id, "event updated");
    Ok(Json(event))
}

/// DELETE /admin/api/events/{id}
pub async fn admin_delete(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = EventRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(event_id = id, user_id = editor.user_id, "event deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found_id("Event", id)))
    }
}
