//! HTTP-level integration tests for the public blog surface: post listing,
//! post detail with tags, and the comment submission / moderation lifecycle.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, post_json};
use meridian_db::models::blog::CreateBlogPost;
use meridian_db::models::taxonomy::{CreateCategory, CreateTag};
use meridian_db::repositories::{BlogRepo, CategoryRepo, CommentRepo, TagRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_post(title: &str, published: bool) -> CreateBlogPost {
    CreateBlogPost {
        title: title.to_string(),
        slug: None,
        excerpt: Some("Teaser".to_string()),
        body: Some("Full body text".to_string()),
        author_name: Some("Comms Team".to_string()),
        category_id: None,
        hero_image_url: None,
        is_published: Some(published),
        tag_ids: None,
    }
}

async fn seed_post(pool: &PgPool, slug: &str, published: bool) -> i64 {
    BlogRepo::create(pool, slug, &new_post(slug, published))
        .await
        .unwrap()
        .id
}

// ---------------------------------------------------------------------------
// Listing and detail
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_shows_only_published_posts(pool: PgPool) {
    seed_post(&pool, "live-post", true).await;
    seed_post(&pool, "draft-post", false).await;

    let app = build_test_app(pool);
    let response = get(app, "/api/blogs").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let posts = json.as_array().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["slug"], "live-post");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters_by_category_and_tag(pool: PgPool) {
    let news = CategoryRepo::create(
        &pool,
        "news",
        &CreateCategory {
            name: "News".to_string(),
            slug: None,
            description: None,
        },
    )
    .await
    .unwrap();
    let climate = TagRepo::create(
        &pool,
        "climate",
        &CreateTag {
            name: "Climate".to_string(),
            slug: None,
        },
    )
    .await
    .unwrap();

    let mut tagged = new_post("tagged-post", true);
    tagged.category_id = Some(news.id);
    tagged.tag_ids = Some(vec![climate.id]);
    BlogRepo::create(&pool, "tagged-post", &tagged).await.unwrap();

    seed_post(&pool, "plain-post", true).await;

    let app = build_test_app(pool.clone());
    let response = get(app, "/api/blogs?category=news").await;
    let json = body_json(response).await;
    let posts = json.as_array().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["slug"], "tagged-post");

    let app = build_test_app(pool.clone());
    let response = get(app, "/api/blogs?tag=climate").await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);

    // An unrelated tag matches nothing.
    let app = build_test_app(pool);
    let response = get(app, "/api/blogs?tag=no-such-tag").await;
    let json = body_json(response).await;
    assert!(json.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_post_detail_includes_tags(pool: PgPool) {
    let climate = TagRepo::create(
        &pool,
        "climate",
        &CreateTag {
            name: "Climate".to_string(),
            slug: None,
        },
    )
    .await
    .unwrap();

    let mut input = new_post("detail-post", true);
    input.tag_ids = Some(vec![climate.id]);
    BlogRepo::create(&pool, "detail-post", &input).await.unwrap();

    let app = build_test_app(pool);
    let response = get(app, "/api/blogs/detail-post").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["title"], "detail-post");
    assert_eq!(json["body"], "Full body text");
    let tags = json["tags"].as_array().unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0]["slug"], "climate");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_draft_post_is_404_publicly(pool: PgPool) {
    seed_post(&pool, "draft-post", false).await;

    let app = build_test_app(pool);
    let response = get(app, "/api/blogs/draft-post").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_comment_lands_pending_and_stays_hidden(pool: PgPool) {
    seed_post(&pool, "commented", true).await;

    let app = build_test_app(pool.clone());
    let body = serde_json::json!({
        "author_name": "Ada",
        "body": "Lovely initiative!",
        "guest_id": "guest-1718041622011-k3xq9w2f"
    });
    let response = post_json(app, "/api/blogs/commented/comments", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["status"], "pending");
    assert_eq!(json["author_name"], "Ada");

    // Pending comments are not served publicly.
    let app = build_test_app(pool);
    let response = get(app, "/api/blogs/commented/comments").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_approved_comment_becomes_visible(pool: PgPool) {
    let post_id = seed_post(&pool, "commented", true).await;

    let app = build_test_app(pool.clone());
    let body = serde_json::json!({ "author_name": "Ada", "body": "First!" });
    let response = post_json(app, "/api/blogs/commented/comments", body).await;
    let created = body_json(response).await;
    let comment_id = created["id"].as_i64().unwrap();

    CommentRepo::set_status(&pool, comment_id, "approved")
        .await
        .unwrap()
        .expect("comment should exist");

    let app = build_test_app(pool);
    let response = get(app, "/api/blogs/commented/comments").await;
    let json = body_json(response).await;
    let comments = json.as_array().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["post_id"], post_id);
    assert_eq!(comments[0]["body"], "First!");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_comment_on_draft_post_is_404(pool: PgPool) {
    seed_post(&pool, "draft-post", false).await;

    let app = build_test_app(pool);
    let body = serde_json::json!({ "author_name": "Ada", "body": "Hello?" });
    let response = post_json(app, "/api/blogs/draft-post/comments", body).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_comment_validation_rejections(pool: PgPool) {
    seed_post(&pool, "strict", true).await;

    // Blank author name.
    let app = build_test_app(pool.clone());
    let body = serde_json::json!({ "author_name": "  ", "body": "text" });
    let response = post_json(app, "/api/blogs/strict/comments", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Blank body.
    let app = build_test_app(pool.clone());
    let body = serde_json::json!({ "author_name": "Ada", "body": "" });
    let response = post_json(app, "/api/blogs/strict/comments", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Over-long body.
    let app = build_test_app(pool.clone());
    let body = serde_json::json!({ "author_name": "Ada", "body": "x".repeat(5_001) });
    let response = post_json(app, "/api/blogs/strict/comments", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Malformed optional email.
    let app = build_test_app(pool);
    let body = serde_json::json!({
        "author_name": "Ada",
        "author_email": "not-an-email",
        "body": "text"
    });
    let response = post_json(app, "/api/blogs/strict/comments", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
