//! clientdesk library - http handlers and application setup.
//!
//! this crate provides the web server for clientdesk, a multi-tenant client
//! administration tool:
//! - [`handlers`]: http request handlers for the server-rendered interface
//! - [`cli`]: command-line interface implementation
//! - [`auth`]: password hashing and verification
//! - [`session`]: session state helpers (login, selection, flash messages)

#![warn(missing_docs)]

pub mod auth;
pub mod cli;
pub mod handlers;
pub mod session;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer, cookie::time::Duration};

use clientdesk_access::AccessEngine;
use clientdesk_db::ClientdeskDb;
use clientdesk_types::Config;

/// shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// database connection for persistent storage.
    pub db: ClientdeskDb,
    /// access decision engine.
    pub engine: AccessEngine,
    /// server configuration.
    pub config: Config,
}

/// create the axum application with all routes.
///
/// the session layer uses the in-memory store: sessions are scoped to one
/// process and die with it, which is all the deployment model asks for.
pub fn create_app(db: ClientdeskDb, config: Config) -> Router {
    let state = AppState {
        db,
        engine: AccessEngine::new(),
        config: config.clone(),
    };

    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_name(config.session.cookie_name)
        .with_secure(config.session.cookie_secure)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(
            config.session.expiry_minutes,
        )));

    Router::new()
        .route("/", get(handlers::root))
        .route("/healthz", get(handlers::health))
        .route("/login", get(handlers::login_form).post(handlers::login))
        .route("/logout", post(handlers::logout))
        .route("/dashboard", get(handlers::dashboard))
        .route(
            "/clients",
            get(handlers::list_clients).post(handlers::create_client),
        )
        .route("/clients/{id}", post(handlers::update_client))
        .route("/clients/{id}/select", post(handlers::select_client))
        .route("/clients/clear", post(handlers::clear_selection))
        .route("/clients/{id}/delete", post(handlers::delete_client))
        .route("/clients/{id}/restore", post(handlers::restore_client))
        .route(
            "/users",
            get(handlers::list_users).post(handlers::create_user),
        )
        .route("/users/create", get(handlers::create_user_form))
        .route("/users/{id}/grants", post(handlers::assign_grant))
        .route("/users/{id}/grants/revoke", post(handlers::revoke_grant))
        .route("/users/{id}/delete", post(handlers::delete_user))
        .route(
            "/personnel",
            get(handlers::list_personnel).post(handlers::create_personnel),
        )
        .route("/personnel/create", get(handlers::create_personnel_form))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            handlers::validate_selected_client,
        ))
        .layer(session_layer)
        .with_state(state)
}
