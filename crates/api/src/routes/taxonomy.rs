//! Route definitions for tags and categories.

use axum::routing::get;
use axum::Router;

use crate::handlers::taxonomy;
use crate::state::AppState;

/// Public tag routes mounted at `/api/tags`.
///
/// ```text
/// GET /  -> list_tags
/// ```
pub fn tag_router() -> Router<AppState> {
    Router::new().route("/", get(taxonomy::list_tags))
}

/// Public category routes mounted at `/api/categories`.
///
/// ```text
/// GET /  -> list_categories
/// ```
pub fn category_router() -> Router<AppState> {
    Router::new().route("/", get(taxonomy::list_categories))
}

/// Admin tag routes mounted at `/admin/api/tags`.
///
/// ```text
/// GET    /      -> list_tags (same list the public sees)
/// POST   /      -> admin_create_tag
/// PUT    /{id}  -> admin_update_tag
/// DELETE /{id}  -> admin_delete_tag
/// ```
pub fn admin_tag_router() -> Router<AppState> {
    Router::new()
        .route("/", get(taxonomy::list_tags).post(taxonomy::admin_create_tag))
        .route(
            "/{id}",
            axum::routing::put(taxonomy::admin_update_tag).delete(taxonomy::admin_delete_tag),
        )
}

/// Admin category routes mounted at `/admin/api/categories`.
///
/// ```text
/// GET    /      -> list_categories
/// POST   /      -> admin_create_category
/// PUT    /{id}  -> admin_update_category
/// DELETE /{id}  -> admin_delete_category
/// ```
pub fn admin_category_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(taxonomy::list_categories).post(taxonomy::admin_create_category),
        )
        .route(
            "/{id}",
            axum::routing::put(taxonomy::admin_update_category)
                .delete(taxonomy::admin_delete_category),
        )
}
