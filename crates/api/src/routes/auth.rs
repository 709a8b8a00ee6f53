//! `/api/auth`: login, refresh, session lookup, logout.
//!
//! Login and refresh are open by necessity; session and logout
//! authenticate through the extractors in their handlers.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh))
        .route("/session", get(auth::session))
        .route("/logout", post(auth::logout))
}
