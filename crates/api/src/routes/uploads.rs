//! Route definitions for generic file uploads.

use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;

use crate::handlers::uploads;
use crate::state::AppState;

/// Routes mounted at `/admin/api/uploads`.
///
/// The default 2 MB body limit is raised here to the upload cap; every
/// other route keeps the default.
///
/// ```text
/// POST   /        -> upload (multipart)
/// GET    /        -> list (?limit&offset)
/// DELETE /{name}  -> delete
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", post(uploads::upload).get(uploads::list))
        .route("/{name}", axum::routing::delete(uploads::delete))
        .layer(DefaultBodyLimit::max(uploads::MAX_UPLOAD_BYTES))
}
