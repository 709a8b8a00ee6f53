//! Route definitions for blog posts, their engagement counters, and
//! their comment threads.

use axum::routing::get;
use axum::Router;

use crate::handlers::{blogs, comments, engagement};
use crate::state::AppState;

/// Public routes mounted at `/api/blogs`.
///
/// ```text
/// GET  /                  -> list (published, ?category&tag&limit&offset)
/// GET  /{slug}            -> get by slug (with tags)
/// GET  /{slug}/views      -> engagement::get_views
/// POST /{slug}/views      -> engagement::record_view
/// GET  /{slug}/like       -> engagement::get_like_state (?guest_id=)
/// POST /{slug}/like       -> engagement::toggle_like
/// GET  /{slug}/comments   -> comments::list_for_post (approved only)
/// POST /{slug}/comments   -> comments::create (lands pending)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(blogs::list))
        .route("/{slug}", get(blogs::get_by_slug))
        .route(
            "/{slug}/views",
            get(engagement::get_views).post(engagement::record_view),
        )
        .route(
            "/{slug}/like",
            get(engagement::get_like_state).post(engagement::toggle_like),
        )
        .route(
            "/{slug}/comments",
            get(comments::list_for_post).post(comments::create),
        )
}

/// Admin routes mounted at `/admin/api/blogs`.
///
/// ```text
/// GET    /      -> admin_list (all posts)
/// POST   /      -> admin_create
/// GET    /{id}  -> admin_get (with tags)
/// PUT    /{id}  -> admin_update
/// DELETE /{id}  -> admin_delete
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(blogs::admin_list).post(blogs::admin_create))
        .route(
            "/{id}",
            get(blogs::admin_get)
                .put(blogs::admin_update)
                .delete(blogs::admin_delete),
        )
}

/// Comment moderation routes mounted at `/admin/api/comments`.
///
/// ```text
/// GET    /      -> comments::admin_list (?status&limit&offset)
/// PATCH  /{id}  -> comments::admin_moderate
/// DELETE /{id}  -> comments::admin_delete
/// ```
pub fn moderation_router() -> Router<AppState> {
    Router::new()
        .route("/", get(comments::admin_list))
        .route(
            "/{id}",
            axum::routing::patch(comments::admin_moderate).delete(comments::admin_delete),
        )
}
