//! HTTP-level integration tests for auth endpoints and RBAC enforcement.
//!
//! Tests cover login, token refresh and rotation, session lookup, logout,
//! account lockout, and role gating on the admin surface.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json, post_json_auth};
use meridian_api::auth::password::hash_password;
use meridian_db::models::user::CreateUser;
use meridian_db::repositories::UserRepo;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Seed an account straight into the database, bypassing the admin API.
/// Returns the row together with the plaintext password.
async fn create_test_user(
    pool: &PgPool,
    email: &str,
    role: &str,
) -> (meridian_db::models::user::User, String) {
    let password = "a-long-enough-passphrase";
    let hashed = hash_password(password).expect("hashing should succeed");
    let input = CreateUser {
        name: format!("Test {role}"),
        email: email.to_string(),
        password_hash: hashed,
        role: role.to_string(),
    };
    let user = UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed");
    (user, password.to_string())
}

/// Log in over HTTP and hand back the parsed token-pair response.
async fn login_user(app: axum::Router, email: &str, password: &str) -> serde_json::Value {
    let body = serde_json::json!({ "email": email, "password": password });
    let response = post_json(app, "/api/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Auth flow tests
// ---------------------------------------------------------------------------

/// A correct email/password pair yields the full token bundle.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_success(pool: PgPool) {
    let (user, password) = create_test_user(&pool, "login@test.com", "admin").await;
    let app = common::build_test_app(pool);

    let json = login_user(app, "login@test.com", &password).await;

    assert!(json["access_token"].is_string(), "response must contain access_token");
    assert!(json["refresh_token"].is_string(), "response must contain refresh_token");
    assert!(json["expires_in"].is_number(), "response must contain expires_in");
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["email"], "login@test.com");
    assert_eq!(json["user"]["role"], "admin");
    assert!(
        json["user"]["password_hash"].is_null(),
        "password hash must never appear in responses"
    );
}

/// A bad password is a plain 401.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    let (_user, _password) = create_test_user(&pool, "wrongpw@test.com", "admin").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "wrongpw@test.com", "password": "incorrect_password" });
    let response = post_json(app, "/api/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Login with a nonexistent email returns 401 with the same generic message
/// as a wrong password, so the endpoint does not leak which emails exist.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_nonexistent_user(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "ghost@test.com", "password": "whatever" });
    let response = post_json(app, "/api/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid email or password");
}

/// Deactivated accounts cannot log in even with correct credentials.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_inactive_user(pool: PgPool) {
    let (user, password) = create_test_user(&pool, "inactive@test.com", "admin").await;
    UserRepo::deactivate(&pool, user.id)
        .await
        .expect("deactivation should succeed");

    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "inactive@test.com", "password": password });
    let response = post_json(app, "/api/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// A valid refresh token returns new tokens, and the old one stops working.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_token_refresh_rotates(pool: PgPool) {
    let (_user, password) = create_test_user(&pool, "refresher@test.com", "editor").await;

    let app = common::build_test_app(pool.clone());
    let login_json = login_user(app, "refresher@test.com", &password).await;
    let refresh_token = login_json["refresh_token"].as_str().unwrap();

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(app, "/api/auth/refresh", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    // Rotation: the reply carries a fresh refresh token.
    assert_ne!(
        json["refresh_token"].as_str().unwrap(),
        refresh_token,
        "the consumed refresh token must not be reissued"
    );

    // Replaying the consumed token must fail.
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(app, "/api/auth/refresh", body).await;
    assert_eq!(
        response.status(),
        StatusCode::UNAUTHORIZED,
        "a refresh token must work exactly once"
    );
}

/// A token the server never issued is rejected outright.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_refresh_with_invalid_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "refresh_token": "not-a-real-token" });
    let response = post_json(app, "/api/auth/refresh", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// GET /api/auth/session returns the authenticated user's profile.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_session_returns_profile(pool: PgPool) {
    let (user, password) = create_test_user(&pool, "whoami@test.com", "editor").await;

    let app = common::build_test_app(pool.clone());
    let login_json = login_user(app, "whoami@test.com", &password).await;
    let token = login_json["access_token"].as_str().unwrap();

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/auth/session", token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["id"], user.id);
    assert_eq!(json["email"], "whoami@test.com");
    assert_eq!(json["role"], "editor");
}

/// GET /api/auth/session without a token returns 401.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_session_requires_auth(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/auth/session").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Logout revokes sessions and returns 204 No Content; the refresh token
/// issued at login is dead afterwards.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_logout_revokes_sessions(pool: PgPool) {
    let (_user, password) = create_test_user(&pool, "logout@test.com", "admin").await;

    let app = common::build_test_app(pool.clone());
    let login_json = login_user(app, "logout@test.com", &password).await;
    let access_token = login_json["access_token"].as_str().unwrap();
    let refresh_token = login_json["refresh_token"].as_str().unwrap();

    let app = common::build_test_app(pool.clone());
    let response =
        post_json_auth(app, "/api/auth/logout", serde_json::json!({}), access_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(app, "/api/auth/refresh", body).await;
    assert_eq!(
        response.status(),
        StatusCode::UNAUTHORIZED,
        "refresh must fail after logout"
    );
}

/// Five bad passwords in a row trip the lockout, which then refuses the
/// real password too.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_account_lockout(pool: PgPool) {
    let (_user, password) = create_test_user(&pool, "lockme@test.com", "admin").await;

    // Burn through the allowed attempts.
    for _ in 0..5 {
        let app = common::build_test_app(pool.clone());
        let body = serde_json::json!({ "email": "lockme@test.com", "password": "wrong_pass" });
        let response = post_json(app, "/api/auth/login", body).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    // Further attempts return 403 (locked) -- even with the correct password.
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "email": "lockme@test.com", "password": password });
    let response = post_json(app, "/api/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    let error_msg = json["error"].as_str().unwrap_or("");
    assert!(
        error_msg.contains("locked"),
        "expected a lockout message, got: {error_msg}"
    );
}

// ---------------------------------------------------------------------------
// RBAC enforcement tests
// ---------------------------------------------------------------------------

/// The whole /admin/api surface is closed to anonymous requests.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_endpoint_requires_auth(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/admin/api/blogs").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A garbage bearer token returns 401.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_endpoint_rejects_bad_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/admin/api/blogs", "not.a.jwt").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// An editor can reach content endpoints but not user management.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_user_management_requires_admin_role(pool: PgPool) {
    let (_user, password) = create_test_user(&pool, "editor@test.com", "editor").await;

    let app = common::build_test_app(pool.clone());
    let login_json = login_user(app, "editor@test.com", &password).await;
    let token = login_json["access_token"].as_str().unwrap();

    // Content management is open to editors.
    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/admin/api/blogs", token).await;
    assert_eq!(response.status(), StatusCode::OK);

    // User management is admin-only.
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/admin/api/users", token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
