//! integration tests for personnel listing and creation.

mod common;

use axum::http::StatusCode;

use clientdesk_db::Database;
use clientdesk_types::{AccessLevel, Personnel, PersonnelId, Role};
use common::{TestApp, body_string};

async fn seed_personnel(app: &TestApp, client_id: clientdesk_types::ClientId, first: &str) {
    let person = Personnel::new(
        PersonnelId(0),
        client_id,
        first.to_string(),
        "Tester".to_string(),
        clientdesk_types::UserId(1),
    );
    app.db.create_personnel(&person).await.unwrap();
}

#[tokio::test]
async fn test_personnel_scoped_by_selection() {
    let app = TestApp::new().await;
    let admin = app.create_user("admin", Role::Admin).await;
    let client_a = app.create_client("Alpha", admin.id).await;
    let client_b = app.create_client("Beta", admin.id).await;
    seed_personnel(&app, client_a.id, "Ada").await;
    seed_personnel(&app, client_b.id, "Grace").await;

    let cookie = app.login(&admin).await;

    // unscoped: both records
    let html = body_string(app.get("/personnel", &cookie).await).await;
    assert!(html.contains("Ada"));
    assert!(html.contains("Grace"));

    // scoped to Alpha: only Ada
    app.post_form(&format!("/clients/{}/select", client_a.id), &cookie, "")
        .await;
    let html = body_string(app.get("/personnel", &cookie).await).await;
    assert!(html.contains("Ada"));
    assert!(!html.contains("Grace"));
}

#[tokio::test]
async fn test_personnel_filtered_by_grants_without_selection() {
    let app = TestApp::new().await;
    let admin = app.create_user("admin", Role::Admin).await;
    let user = app.create_user("worker", Role::User).await;
    let granted = app.create_client("Granted Co", admin.id).await;
    let hidden = app.create_client("Hidden Co", admin.id).await;
    app.grant(&user, &granted, AccessLevel::Read).await;
    seed_personnel(&app, granted.id, "Visible").await;
    seed_personnel(&app, hidden.id, "Invisible").await;

    let cookie = app.login(&user).await;
    let html = body_string(app.get("/personnel", &cookie).await).await;
    assert!(html.contains("Visible"));
    assert!(!html.contains("Invisible"));
}

#[tokio::test]
async fn test_create_personnel_for_granted_client() {
    let app = TestApp::new().await;
    let admin = app.create_user("admin", Role::Admin).await;
    let user = app.create_user("worker", Role::User).await;
    let client = app.create_client("Acme", admin.id).await;
    app.grant(&user, &client, AccessLevel::Write).await;

    let cookie = app.login(&user).await;
    let body = format!(
        "client_id={}&first_name=Jane&last_name=Doe&position=Nurse&hire_date=2026-02-01",
        client.id
    );
    let response = app.post_form("/personnel", &cookie, &body).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let records = app.db.list_personnel_for_client(client.id).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].full_name(), "Jane Doe");
    assert_eq!(records[0].created_by, user.id);
}

#[tokio::test]
async fn test_create_personnel_for_ungranted_client_rejected() {
    let app = TestApp::new().await;
    let admin = app.create_user("admin", Role::Admin).await;
    let user = app.create_user("worker", Role::User).await;
    let client = app.create_client("Forbidden", admin.id).await;

    let cookie = app.login(&user).await;
    let body = format!("client_id={}&first_name=Jane&last_name=Doe", client.id);
    app.post_form("/personnel", &cookie, &body).await;

    assert!(
        app.db
            .list_personnel_for_client(client.id)
            .await
            .unwrap()
            .is_empty()
    );

    // same message as a nonexistent client id
    let html = body_string(app.get("/personnel/create", &cookie).await).await;
    assert!(html.contains("invalid client selection"));
}

#[tokio::test]
async fn test_create_personnel_validates_names_and_date() {
    let app = TestApp::new().await;
    let admin = app.create_user("admin", Role::Admin).await;
    let client = app.create_client("Acme", admin.id).await;

    let cookie = app.login(&admin).await;

    let body = format!("client_id={}&first_name=&last_name=Doe", client.id);
    app.post_form("/personnel", &cookie, &body).await;
    let html = body_string(app.get("/personnel/create", &cookie).await).await;
    assert!(html.contains("first and last name are required"));

    let body = format!(
        "client_id={}&first_name=Jane&last_name=Doe&hire_date=02%2F01%2F2026",
        client.id
    );
    app.post_form("/personnel", &cookie, &body).await;
    let html = body_string(app.get("/personnel/create", &cookie).await).await;
    assert!(html.contains("hire date must be YYYY-MM-DD"));

    assert!(
        app.db
            .list_personnel_for_client(client.id)
            .await
            .unwrap()
            .is_empty()
    );
}
