//! Route definitions for events.

use axum::routing::get;
use axum::Router;

use crate::handlers::events;
use crate::state::AppState;

/// Public routes mounted at `/api/events`.
///
/// ```text
/// GET /        -> list (published only, ?upcoming=true)
/// GET /{slug}  -> get by slug
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(events::list))
        .route("/{slug}", get(events::get_by_slug))
}

/// Admin routes mounted at `/admin/api/events`.
///
/// ```text
/// GET    /      -> admin_list
/// POST   /      -> admin_create
/// GET    /{id}  -> admin_get
/// PUT    /{id}  -> admin_update
/// DELETE /{id}  -> admin_delete
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(events::admin_list).post(events::admin_create))
        .route(
            "/{id}",
            get(events::admin_get)
                .put(events::admin_update)
                .delete(events::admin_delete),
        )
}
