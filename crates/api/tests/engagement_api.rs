//! HTTP-level integration tests for blog engagement counters.
//!
//! Covers view counting with per-guest deduplication, the idempotent like
//! toggle, and the authoritative-count contract (every response carries
//! the full server-side total).

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, build_test_app, get, post_json};
use meridian_db::models::blog::CreateBlogPost;
use meridian_db::repositories::BlogRepo;
use sqlx::PgPool;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_post(pool: &PgPool, slug: &str, published: bool) -> i64 {
    let input = CreateBlogPost {
        title: slug.to_string(),
        slug: None,
        excerpt: None,
        body: Some("body".to_string()),
        author_name: None,
        category_id: None,
        hero_image_url: None,
        is_published: Some(published),
        tag_ids: None,
    };
    BlogRepo::create(pool, slug, &input).await.unwrap().id
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_view_count_starts_at_zero(pool: PgPool) {
    seed_post(&pool, "fresh", true).await;

    let app = build_test_app(pool);
    let response = get(app, "/api/blogs/fresh/views").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["views"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_record_view_returns_new_total(pool: PgPool) {
    seed_post(&pool, "viewed", true).await;

    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/blogs/viewed/views",
        serde_json::json!({ "guest_id": "guest-100-aaaaaaaa" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["views"], 1);

    // A different guest increments again.
    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/blogs/viewed/views",
        serde_json::json!({ "guest_id": "guest-200-bbbbbbbb" }),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["views"], 2);
}

/// A repeat view from the same guest inside the dedup window does not
/// increment the counter, but the response still carries the total.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_repeat_view_within_window_is_deduplicated(pool: PgPool) {
    seed_post(&pool, "deduped", true).await;
    let body = serde_json::json!({ "guest_id": "guest-300-cccccccc" });

    let app = build_test_app(pool.clone());
    let response = post_json(app, "/api/blogs/deduped/views", body.clone()).await;
    let json = body_json(response).await;
    assert_eq!(json["views"], 1);

    let app = build_test_app(pool);
    let response = post_json(app, "/api/blogs/deduped/views", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["views"], 1, "repeat view must not double-count");
}

/// Views without a guest id (no body at all) always count.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_anonymous_views_always_count(pool: PgPool) {
    seed_post(&pool, "anon", true).await;

    for expected in 1..=3 {
        let app = build_test_app(pool.clone());
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/blogs/anon/views")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["views"], expected);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_view_endpoints_404_for_draft_post(pool: PgPool) {
    seed_post(&pool, "draft", false).await;

    let app = build_test_app(pool.clone());
    let response = get(app, "/api/blogs/draft/views").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = build_test_app(pool);
    let response = post_json(app, "/api/blogs/draft/views", serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_malformed_guest_id_is_rejected(pool: PgPool) {
    seed_post(&pool, "strict", true).await;

    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/blogs/strict/views",
        serde_json::json!({ "guest_id": "has spaces!" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Likes
// ---------------------------------------------------------------------------

/// Double-tap: like then unlike restores the original state.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_like_toggle_roundtrip(pool: PgPool) {
    seed_post(&pool, "likeable", true).await;
    let body = serde_json::json!({ "guest_id": "guest-400-dddddddd" });

    let app = build_test_app(pool.clone());
    let response = post_json(app, "/api/blogs/likeable/like", body.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["likes"], 1);
    assert_eq!(json["is_liked"], true);

    let app = build_test_app(pool);
    let response = post_json(app, "/api/blogs/likeable/like", body).await;
    let json = body_json(response).await;
    assert_eq!(json["likes"], 0);
    assert_eq!(json["is_liked"], false);
}

/// Likes from different guests accumulate independently.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_likes_are_per_guest(pool: PgPool) {
    seed_post(&pool, "popular", true).await;

    let app = build_test_app(pool.clone());
    post_json(
        app,
        "/api/blogs/popular/like",
        serde_json::json!({ "guest_id": "guest-1-aaaaaaaa" }),
    )
    .await;
    let app = build_test_app(pool.clone());
    post_json(
        app,
        "/api/blogs/popular/like",
        serde_json::json!({ "guest_id": "guest-2-bbbbbbbb" }),
    )
    .await;

    // The first guest sees likes=2, is_liked=true.
    let app = build_test_app(pool.clone());
    let response = get(app, "/api/blogs/popular/like?guest_id=guest-1-aaaaaaaa").await;
    let json = body_json(response).await;
    assert_eq!(json["likes"], 2);
    assert_eq!(json["is_liked"], true);

    // A third guest sees the same count but is_liked=false.
    let app = build_test_app(pool.clone());
    let response = get(app, "/api/blogs/popular/like?guest_id=guest-3-cccccccc").await;
    let json = body_json(response).await;
    assert_eq!(json["likes"], 2);
    assert_eq!(json["is_liked"], false);

    // Without a guest id, is_liked defaults to false.
    let app = build_test_app(pool);
    let response = get(app, "/api/blogs/popular/like").await;
    let json = body_json(response).await;
    assert_eq!(json["likes"], 2);
    assert_eq!(json["is_liked"], false);
}

/// The like toggle requires a guest id.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_like_without_guest_id_is_rejected(pool: PgPool) {
    seed_post(&pool, "likeable", true).await;

    let app = build_test_app(pool);
    let response = post_json(app, "/api/blogs/likeable/like", serde_json::json!({})).await;
    // Missing required field fails JSON deserialization.
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
