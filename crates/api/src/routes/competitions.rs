//! Route definitions for competitions, their application forms, and
//! submissions.

use axum::routing::{get, patch, post, put};
use axum::Router;

use crate::handlers::{applications, competitions};
use crate::state::AppState;

/// Public routes mounted at `/api/competitions`.
///
/// ```text
/// GET   /                      -> list (published only)
/// POST  /apply                 -> applications::apply
/// GET   /{slug}                -> get by slug
/// GET   /{slug}/form           -> form config + render plan
/// PATCH /{slug}/applications   -> applications::review (editor/admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(competitions::list))
        .route("/apply", post(applications::apply))
        .route("/{slug}", get(competitions::get_by_slug))
        .route("/{slug}/form", get(competitions::get_form))
        .route("/{slug}/applications", patch(applications::review))
}

/// Admin routes mounted at `/admin/api/competitions`.
///
/// The `{id}` segment of the applications route carries the competition
/// slug (the router needs one parameter name per position); the handler
/// reads it as a string.
///
/// ```text
/// GET    /                    -> admin_list
/// POST   /                    -> admin_create
/// GET    /{id}                -> admin_get
/// PUT    /{id}                -> admin_update
/// DELETE /{id}                -> admin_delete
/// PUT    /{id}/form           -> admin_save_form
/// GET    /{slug}/applications -> applications::admin_list (?status=)
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(competitions::admin_list).post(competitions::admin_create),
        )
        .route(
            "/{id}",
            get(competitions::admin_get)
                .put(competitions::admin_update)
                .delete(competitions::admin_delete),
        )
        .route("/{id}/form", put(competitions::admin_save_form))
        .route("/{id}/applications", get(applications::admin_list))
}
