//! shared test utilities for the http integration tests.

#![allow(dead_code)] // test utilities may not all be used in every test file

use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
};
use tower::ServiceExt;

use clientdesk::auth;
use clientdesk_db::{ClientdeskDb, Database};
use clientdesk_types::{AccessLevel, Client, ClientId, Config, Role, User, UserId};

/// the password every fixture user logs in with.
pub const TEST_PASSWORD: &str = "correct horse battery";

/// test fixture: an in-memory database and the app router over it.
pub struct TestApp {
    pub db: ClientdeskDb,
    pub app: Router,
}

impl TestApp {
    /// create a new fixture with an empty in-memory database.
    pub async fn new() -> Self {
        let db = ClientdeskDb::new_in_memory()
            .await
            .expect("failed to create in-memory database");
        let app = clientdesk::create_app(db.clone(), Config::default());
        Self { db, app }
    }

    /// create a user with [`TEST_PASSWORD`] and the given role.
    pub async fn create_user(&self, name: &str, role: Role) -> User {
        let mut user = User::new(
            UserId(0),
            name.to_string(),
            format!("{}@example.com", name),
            role,
        );
        user.password_hash = auth::hash_password(TEST_PASSWORD).unwrap();
        self.db.create_user(&user).await.unwrap()
    }

    /// create a client.
    pub async fn create_client(&self, name: &str, created_by: UserId) -> Client {
        let client = Client::new(
            ClientId(0),
            name.to_string(),
            "Consulting".to_string(),
            created_by,
        );
        self.db.create_client(&client).await.unwrap()
    }

    /// grant access to a client.
    pub async fn grant(&self, user: &User, client: &Client, level: AccessLevel) {
        self.db.grant_access(user.id, client.id, level).await.unwrap();
    }

    /// log a user in, returning the session cookie for later requests.
    pub async fn login(&self, user: &User) -> String {
        let body = format!(
            "email={}&password={}",
            urlencode(&user.email),
            urlencode(TEST_PASSWORD)
        );
        let response = self
            .app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/login")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.status(),
            StatusCode::SEE_OTHER,
            "login should redirect on success"
        );

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .expect("login should set a session cookie")
            .to_str()
            .unwrap();
        // keep only the name=value pair
        cookie.split(';').next().unwrap().to_string()
    }

    /// GET a path with the given session cookie.
    pub async fn get(&self, path: &str, cookie: &str) -> Response<Body> {
        self.app
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(path)
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    /// POST a urlencoded form to a path with the given session cookie.
    pub async fn post_form(&self, path: &str, cookie: &str, body: &str) -> Response<Body> {
        self.app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(path)
                    .header(header::COOKIE, cookie)
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }
}

/// read a response body to a string.
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// minimal percent-encoding for form values used in tests.
pub fn urlencode(s: &str) -> String {
    let mut out = String::new();
    for c in s.chars() {
        match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' | '~' => out.push(c),
            ' ' => out.push('+'),
            _ => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).as_bytes() {
                    out.push_str(&format!("%{:02X}", byte));
                }
            }
        }
    }
    out
}
