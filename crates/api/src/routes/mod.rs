pub mod auth;
pub mod blogs;
pub mod competitions;
pub mod events;
pub mod health;
pub mod programmes;
pub mod publications;
pub mod taxonomy;
pub mod uploads;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the public `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                       login (public)
/// /auth/refresh                     refresh (public)
/// /auth/session                     current user (requires auth)
/// /auth/logout                      logout (requires auth)
///
/// /programme-areas                  list published areas
/// /programme-areas/{slug}           get area
/// /programmes                       list published programmes (?area=)
/// /programmes/{slug}                get programme
///
/// /competitions                     list published competitions
/// /competitions/apply               submit an application (POST)
/// /competitions/{slug}              get competition
/// /competitions/{slug}/form         form config + render plan
/// /competitions/{slug}/applications review update (PATCH, editor/admin)
///
/// /events                           list published events (?upcoming=)
/// /events/{slug}                    get event
///
/// /blogs                            list published posts (?category&tag)
/// /blogs/{slug}                     get post with tags
/// /blogs/{slug}/views               view count (GET), count a view (POST)
/// /blogs/{slug}/like                like state (GET), toggle (POST)
/// /blogs/{slug}/comments            approved comments (GET), submit (POST)
///
/// /publications                     list published publications
/// /publications/{slug}              get publication
///
/// /tags                             list tags
/// /categories                       list categories
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Session endpoints for the admin frontend.
        .nest("/auth", auth::router())
        // Public content reads, slug-addressed, published rows only.
        .nest("/programme-areas", programmes::area_router())
        .nest("/programmes", programmes::programme_router())
        .nest("/competitions", competitions::router())
        .nest("/events", events::router())
        .nest("/blogs", blogs::router())
        .nest("/publications", publications::router())
        .nest("/tags", taxonomy::tag_router())
        .nest("/categories", taxonomy::category_router())
}

/// Build the `/admin/api` route tree (id-addressed CRUD; every handler
/// gates on editor or admin role).
///
/// ```text
/// /programme-areas[/{id}]           area CRUD
/// /programmes[/{id}]                programme CRUD
/// /competitions[/{id}]              competition CRUD
/// /competitions/{id}/form           replace form document (PUT)
/// /competitions/{slug}/applications submissions for review (?status=)
/// /events[/{id}]                    event CRUD
/// /blogs[/{id}]                     blog post CRUD
/// /publications[/{id}]              publication CRUD
/// /comments[/{id}]                  moderation list, approve/reject, delete
/// /tags[/{id}]                      tag CRUD
/// /categories[/{id}]                category CRUD
/// /users[/{id}]                     user CRUD (admin only)
/// /users/{id}/reset-password        password reset (admin only)
/// /uploads[/{name}]                 multipart upload, list, delete
/// ```
pub fn admin_api_routes() -> Router<AppState> {
    Router::new()
        .nest("/programme-areas", programmes::admin_area_router())
        .nest("/programmes", programmes::admin_programme_router())
        .nest("/competitions", competitions::admin_router())
        .nest("/events", events::admin_router())
        .nest("/blogs", blogs::admin_router())
        .nest("/publications", publications::admin_router())
        .nest("/comments", blogs::moderation_router())
        .nest("/tags", taxonomy::admin_tag_router())
        .nest("/categories", taxonomy::admin_category_router())
        // User management is admin-only; everything above takes editors.
        .nest("/users", users::admin_router())
        .nest("/uploads", uploads::admin_router())
}
