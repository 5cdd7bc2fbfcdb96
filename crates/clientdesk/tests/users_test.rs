//! integration tests for user management and grant assignment.

mod common;

use axum::http::StatusCode;

use clientdesk_db::Database;
use clientdesk_types::{AccessLevel, Role};
use common::{TestApp, body_string};

#[tokio::test]
async fn test_admin_creates_user_with_initial_grant() {
    let app = TestApp::new().await;
    let admin = app.create_user("admin", Role::Admin).await;
    let client = app.create_client("Acme", admin.id).await;

    let cookie = app.login(&admin).await;
    let body = format!(
        "name=New+Person&email=new%40example.com&password=longenough&role=user&client_id={}&access_level=write",
        client.id
    );
    let response = app.post_form("/users", &cookie, &body).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let created = app
        .db
        .get_user_by_email("new@example.com")
        .await
        .unwrap()
        .expect("user should exist");
    assert_eq!(created.role, Role::User);

    // the grant is visible immediately
    assert!(app.db.has_access(created.id, client.id).await.unwrap());
}

#[tokio::test]
async fn test_manager_cannot_mint_admins() {
    let app = TestApp::new().await;
    let manager = app.create_user("manager", Role::Manager).await;

    let cookie = app.login(&manager).await;
    let body = "name=Evil&email=evil%40example.com&password=longenough&role=admin";
    app.post_form("/users", &cookie, body).await;

    assert!(
        app.db
            .get_user_by_email("evil@example.com")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_regular_user_cannot_create_users() {
    let app = TestApp::new().await;
    let user = app.create_user("worker", Role::User).await;

    let cookie = app.login(&user).await;
    let body = "name=X&email=x%40example.com&password=longenough&role=user";
    let response = app.post_form("/users", &cookie, body).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    assert!(
        app.db
            .get_user_by_email("x@example.com")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let app = TestApp::new().await;
    let admin = app.create_user("admin", Role::Admin).await;

    let cookie = app.login(&admin).await;
    let body = "name=Duplicate&email=admin%40example.com&password=longenough&role=user";
    app.post_form("/users", &cookie, body).await;

    let html = body_string(app.get("/users/create", &cookie).await).await;
    assert!(html.contains("a user with that email already exists"));
}

#[tokio::test]
async fn test_short_password_is_rejected() {
    let app = TestApp::new().await;
    let admin = app.create_user("admin", Role::Admin).await;

    let cookie = app.login(&admin).await;
    let body = "name=Short&email=short%40example.com&password=tiny&role=user";
    app.post_form("/users", &cookie, body).await;

    assert!(
        app.db
            .get_user_by_email("short@example.com")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_admin_assigns_and_revokes_grant() {
    let app = TestApp::new().await;
    let admin = app.create_user("admin", Role::Admin).await;
    let target = app.create_user("worker", Role::User).await;
    let client = app.create_client("Acme", admin.id).await;

    let cookie = app.login(&admin).await;

    let body = format!("client_id={}&access_level=write", client.id);
    app.post_form(&format!("/users/{}/grants", target.id), &cookie, &body)
        .await;
    assert!(app.db.has_access(target.id, client.id).await.unwrap());

    let body = format!("client_id={}", client.id);
    app.post_form(
        &format!("/users/{}/grants/revoke", target.id),
        &cookie,
        &body,
    )
    .await;
    assert!(!app.db.has_access(target.id, client.id).await.unwrap());
}

#[tokio::test]
async fn test_manager_cannot_manage_grants() {
    let app = TestApp::new().await;
    let admin = app.create_user("admin", Role::Admin).await;
    let manager = app.create_user("manager", Role::Manager).await;
    let target = app.create_user("worker", Role::User).await;
    let client = app.create_client("Acme", admin.id).await;
    app.grant(&manager, &client, AccessLevel::Admin).await;

    let cookie = app.login(&manager).await;
    let body = format!("client_id={}&access_level=read", client.id);
    app.post_form(&format!("/users/{}/grants", target.id), &cookie, &body)
        .await;

    assert!(!app.db.has_access(target.id, client.id).await.unwrap());
}

#[tokio::test]
async fn test_admin_deletes_user_but_not_self() {
    let app = TestApp::new().await;
    let admin = app.create_user("admin", Role::Admin).await;
    let target = app.create_user("leaver", Role::User).await;

    let cookie = app.login(&admin).await;

    // self-deletion is refused
    app.post_form(&format!("/users/{}/delete", admin.id), &cookie, "")
        .await;
    assert!(app.db.get_user(admin.id).await.unwrap().is_some());

    app.post_form(&format!("/users/{}/delete", target.id), &cookie, "")
        .await;
    assert!(app.db.get_user(target.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_users_listing_visible_to_all_roles() {
    let app = TestApp::new().await;
    let admin = app.create_user("admin", Role::Admin).await;
    let user = app.create_user("worker", Role::User).await;

    let cookie = app.login(&user).await;
    let html = body_string(app.get("/users", &cookie).await).await;
    assert!(html.contains(&admin.email));
    // no management actions for a regular user
    assert!(!html.contains("/users/create"));
}
