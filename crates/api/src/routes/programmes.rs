//! Route definitions for programme areas and programmes.

use axum::routing::get;
use axum::Router;

use crate::handlers::programmes;
use crate::state::AppState;

/// Public routes; `area_router` mounts at `/api/programme-areas`,
/// `programme_router` at `/api/programmes`.
///
/// ```text
/// GET /                 -> list (published only)
/// GET /{slug}           -> get by slug
/// ```
pub fn area_router() -> Router<AppState> {
    Router::new()
        .route("/", get(programmes::list_areas))
        .route("/{slug}", get(programmes::get_area_by_slug))
}

/// Public programme routes mounted at `/api/programmes`.
///
/// ```text
/// GET /        -> list (published only, ?area=<slug>)
/// GET /{slug}  -> get by slug
/// ```
pub fn programme_router() -> Router<AppState> {
    Router::new()
        .route("/", get(programmes::list_programmes))
        .route("/{slug}", get(programmes::get_programme_by_slug))
}

/// Admin routes mounted at `/admin/api/programme-areas`.
///
/// ```text
/// GET    /       -> admin_list_areas
/// POST   /       -> admin_create_area
/// GET    /{id}   -> admin_get_area
/// PUT    /{id}   -> admin_update_area
/// DELETE /{id}   -> admin_delete_area
/// ```
pub fn admin_area_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(programmes::admin_list_areas).post(programmes::admin_create_area),
        )
        .route(
            "/{id}",
            get(programmes::admin_get_area)
                .put(programmes::admin_update_area)
                .delete(programmes::admin_delete_area),
        )
}

/// Admin routes mounted at `/admin/api/programmes`.
///
/// ```text
/// GET    /       -> admin_list_programmes
/// POST   /       -> admin_create_programme
/// GET    /{id}   -> admin_get_programme
/// PUT    /{id}   -> admin_update_programme
/// DELETE /{id}   -> admin_delete_programme
/// ```
pub fn admin_programme_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(programmes::admin_list_programmes).post(programmes::admin_create_programme),
        )
        .route(
            "/{id}",
            get(programmes::admin_get_programme)
                .put(programmes::admin_update_programme)
                .delete(programmes::admin_delete_programme),
        )
}
