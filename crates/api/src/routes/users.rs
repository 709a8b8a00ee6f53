//! Route definitions for back-office user management.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/admin/api/users`.
///
/// All of them require the `admin` role (enforced by handler extractors).
///
/// ```text
/// GET    /                     -> list
/// POST   /                     -> create
/// GET    /{id}                 -> get
/// PUT    /{id}                 -> update
/// DELETE /{id}                 -> deactivate
/// POST   /{id}/reset-password  -> reset_password
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list).post(users::create))
        .route(
            "/{id}",
            get(users::get).put(users::update).delete(users::deactivate),
        )
        .route("/{id}/reset-password", post(users::reset_password))
}
