//! Route definitions for publications.

use axum::routing::get;
use axum::Router;

use crate::handlers::publications;
use crate::state::AppState;

/// Public routes mounted at `/api/publications`.
///
/// ```text
/// GET /        -> list (published only)
/// GET /{slug}  -> get by slug
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(publications::list))
        .route("/{slug}", get(publications::get_by_slug))
}

/// Admin routes mounted at `/admin/api/publications`.
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
        .route(
            "/",
            get(publications::admin_list).post(publications::admin_create),
        )
        .route(
            "/{id}",
            get(publications::admin_get)
                .put(publications::admin_update)
                .delete(publications::admin_delete),
        )
}
