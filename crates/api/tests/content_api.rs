//! HTTP-level integration tests for the public content browsing surface:
//! programme areas, programmes, events, publications, and taxonomy.
//!
//! Content is seeded through the repository layer, then read back through
//! the HTTP API. Public endpoints must only ever expose published rows.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_json, build_test_app, get};
use meridian_db::models::event::CreateEvent;
use meridian_db::models::programme::{CreateProgramme, CreateProgrammeArea};
use meridian_db::models::publication::CreatePublication;
use meridian_db::models::taxonomy::{CreateCategory, CreateTag};
use meridian_db::repositories::{
    CategoryRepo, EventRepo, ProgrammeAreaRepo, ProgrammeRepo, PublicationRepo, TagRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_area(title: &str, published: bool) -> CreateProgrammeArea {
    CreateProgrammeArea {
        title: title.to_string(),
        slug: None,
        summary: Some("A focus area".to_string()),
        description: None,
        hero_image_url: None,
        sort_order: None,
        is_published: Some(published),
    }
}

fn new_programme(area_id: i64, title: &str, published: bool) -> CreateProgramme {
    CreateProgramme {
        area_id,
        title: title.to_string(),
        slug: None,
        summary: None,
        body: Some("Programme body".to_string()),
        hero_image_url: None,
        sort_order: None,
        is_published: Some(published),
    }
}

fn new_event(title: &str, starts_in_days: i64, published: bool) -> CreateEvent {
    CreateEvent {
        title: title.to_string(),
        slug: None,
        summary: None,
        description: None,
        location: Some("Community hall".to_string()),
        starts_at: Utc::now() + Duration::days(starts_in_days),
        ends_at: None,
        hero_image_url: None,
        registration_url: None,
        is_published: Some(published),
    }
}

fn new_publication(title: &str, published: bool) -> CreatePublication {
    CreatePublication {
        title: title.to_string(),
        slug: None,
        description: None,
        file_url: "/uploads/report.pdf".to_string(),
        cover_image_url: None,
        published_on: None,
        is_published: Some(published),
    }
}

// ---------------------------------------------------------------------------
// Programme areas
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_areas_shows_only_published(pool: PgPool) {
    ProgrammeAreaRepo::create(&pool, "education", &new_area("Education", true))
        .await
        .unwrap();
    ProgrammeAreaRepo::create(&pool, "draft-area", &new_area("Draft Area", false))
        .await
        .unwrap();

    let app = build_test_app(pool);
    let response = get(app, "/api/programme-areas").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let areas = json.as_array().unwrap();
    assert_eq!(areas.len(), 1, "only the published area should be listed");
    assert_eq!(areas[0]["slug"], "education");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_area_by_slug(pool: PgPool) {
    ProgrammeAreaRepo::create(&pool, "health", &new_area("Health", true))
        .await
        .unwrap();

    let app = build_test_app(pool);
    let response = get(app, "/api/programme-areas/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["title"], "Health");
    assert_eq!(json["summary"], "A focus area");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unpublished_area_is_404_publicly(pool: PgPool) {
    ProgrammeAreaRepo::create(&pool, "hidden", &new_area("Hidden", false))
        .await
        .unwrap();

    let app = build_test_app(pool);
    let response = get(app, "/api/programme-areas/hidden").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Programmes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_programmes_filtered_by_area(pool: PgPool) {
    let education = ProgrammeAreaRepo::create(&pool, "education", &new_area("Education", true))
        .await
        .unwrap();
    let health = ProgrammeAreaRepo::create(&pool, "health", &new_area("Health", true))
        .await
        .unwrap();

    ProgrammeRepo::create(&pool, "scholarships", &new_programme(education.id, "Scholarships", true))
        .await
        .unwrap();
    ProgrammeRepo::create(&pool, "clinics", &new_programme(health.id, "Clinics", true))
        .await
        .unwrap();

    let app = build_test_app(pool.clone());
    let response = get(app, "/api/programmes?area=education").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let programmes = json.as_array().unwrap();
    assert_eq!(programmes.len(), 1);
    assert_eq!(programmes[0]["slug"], "scholarships");

    // Without the filter, both published programmes appear.
    let app = build_test_app(pool);
    let response = get(app, "/api/programmes").await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_programmes_unknown_area_filter_is_404(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/api/programmes?area=no-such-area").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_programme_by_slug(pool: PgPool) {
    let area = ProgrammeAreaRepo::create(&pool, "education", &new_area("Education", true))
        .await
        .unwrap();
    ProgrammeRepo::create(&pool, "mentoring", &new_programme(area.id, "Mentoring", true))
        .await
        .unwrap();

    let app = build_test_app(pool);
    let response = get(app, "/api/programmes/mentoring").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["title"], "Mentoring");
    assert_eq!(json["area_id"], area.id);
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_events_upcoming_filter(pool: PgPool) {
    EventRepo::create(&pool, "gala-2020", &new_event("Past Gala", -400, true))
        .await
        .unwrap();
    EventRepo::create(&pool, "summit", &new_event("Summit", 14, true))
        .await
        .unwrap();
    EventRepo::create(&pool, "secret", &new_event("Secret Meetup", 14, false))
        .await
        .unwrap();

    // Unfiltered list: both published events.
    let app = build_test_app(pool.clone());
    let response = get(app, "/api/events").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 2);

    // ?upcoming=true drops the past event; the draft stays hidden either way.
    let app = build_test_app(pool);
    let response = get(app, "/api/events?upcoming=true").await;
    let json = body_json(response).await;
    let events = json.as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["slug"], "summit");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_event_by_slug(pool: PgPool) {
    EventRepo::create(&pool, "open-day", &new_event("Open Day", 3, true))
        .await
        .unwrap();

    let app = build_test_app(pool);
    let response = get(app, "/api/events/open-day").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["title"], "Open Day");
    assert_eq!(json["location"], "Community hall");
}

// ---------------------------------------------------------------------------
// Publications
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_and_get_publications(pool: PgPool) {
    PublicationRepo::create(&pool, "annual-report", &new_publication("Annual Report", true))
        .await
        .unwrap();
    PublicationRepo::create(&pool, "internal-notes", &new_publication("Internal Notes", false))
        .await
        .unwrap();

    let app = build_test_app(pool.clone());
    let response = get(app, "/api/publications").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let publications = json.as_array().unwrap();
    assert_eq!(publications.len(), 1);
    assert_eq!(publications[0]["slug"], "annual-report");

    let app = build_test_app(pool);
    let response = get(app, "/api/publications/annual-report").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["file_url"], "/uploads/report.pdf");
}

// ---------------------------------------------------------------------------
// Taxonomy
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_tags_and_categories(pool: PgPool) {
    TagRepo::create(
        &pool,
        "climate",
        &CreateTag {
            name: "Climate".to_string(),
            slug: None,
        },
    )
    .await
    .unwrap();
    CategoryRepo::create(
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

    let app = build_test_app(pool.clone());
    let response = get(app, "/api/tags").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["name"], "Climate");

    let app = build_test_app(pool);
    let response = get(app, "/api/categories").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["slug"], "news");
}
