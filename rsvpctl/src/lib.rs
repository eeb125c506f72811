//! # rsvpctl: Wedding RSVP backend
//!
//! `rsvpctl` is the HTTP backend behind a wedding-invitation site. Guests log in with an account
//! created for them by the couple, see the names registered under their invitation, answer the
//! RSVP for each name (attendance, menu choice, allergies) and leave comments. Admins manage the
//! accounts and guest lists through the same API.
//!
//! ## Architecture
//!
//! The application is built on [Axum](https://github.com/tokio-rs/axum) for the HTTP layer and
//! uses PostgreSQL for persistence.
//!
//! ### Request Flow
//!
//! Every request under `/api/*` reaches a handler in [`api::handlers`]. The handler validates
//! its JSON body, opens a single transaction, runs one or more repository calls from
//! [`db::handlers`] against it and commits before replying. Errors are returned as
//! [`errors::Error`], which renders the status code and a `{"error": ...}` body; returning early
//! drops the transaction and rolls it back.
//!
//! ### Data Model
//!
//! Four tables, all owned by a user and removed with it:
//!
//! - `users`: account, Argon2 password hash, role (`admin` or `guest`), personal message
//! - `name_surnames`: guest-list entries, keyed by `(user_username, name_surname)`
//! - `form_responses`: one RSVP per guest-list entry, removed with the entry
//! - `guest_comments`: free-text comments, keyed by `(user_username, comment)`
//!
//! ### Other Surfaces
//!
//! - `/check-db-health` and `/healthz` for liveness checks
//! - `/api-docs/openapi.json` and `/docs` for the OpenAPI document
//! - everything else serves the embedded single-page frontend
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use rsvpctl::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = rsvpctl::config::Args::parse();
//!     let config = Config::load(&args)?;
//!     rsvpctl::telemetry::init_telemetry(config.debug_enabled)?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.ok();
//!     })
//!     .await
//! }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
mod openapi;
pub mod telemetry;

#[cfg(test)]
pub mod test_utils;

use crate::{
    auth::password,
    config::CorsOrigin,
    db::handlers::Users,
    openapi::ApiDoc,
};
use axum::{
    Json, Router,
    http::{self, HeaderValue},
    routing::{delete, get, post},
};
use bon::Builder;
pub use config::Config;
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, debug, info, instrument};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

/// Application state shared across all request handlers.
///
/// ```ignore
/// let state = AppState::builder()
///     .db(pool)
///     .config(config)
///     .build();
/// ```
#[derive(Clone, Builder)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
}

/// Get the rsvpctl database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Ensure an admin account with the given password exists.
///
/// Idempotent: creates the account if missing, otherwise resets its password and role.
#[instrument(skip_all, fields(username = %username))]
pub async fn create_initial_admin_user(
    username: &str,
    password: &str,
    params: password::Argon2Params,
    db: &PgPool,
) -> anyhow::Result<()> {
    let password_hash = password::hash_password_blocking(password.to_string(), params)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to hash admin password: {e}"))?;

    let mut tx = db.begin().await?;
    Users::new(&mut tx).upsert_admin(username, &password_hash).await?;
    tx.commit().await?;

    info!("Admin user '{}' is ready", username);
    Ok(())
}

/// Connect using the configured pool settings.
async fn connect_pool(config: &Config) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.pool.max_connections)
        .min_connections(config.pool.min_connections)
        .acquire_timeout(Duration::from_secs(config.pool.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.pool.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.pool.max_lifetime_secs))
        .connect(&config.connection_uri)
        .await?;
    Ok(pool)
}

/// Connect (unless a pool is supplied), run migrations and seed the admin account.
async fn setup_database(config: &Config, pool: Option<PgPool>) -> anyhow::Result<PgPool> {
    let pool = match pool {
        Some(pool) => pool,
        None => {
            info!("Connecting to database");
            connect_pool(config).await?
        }
    };

    migrator().run(&pool).await?;

    match config.admin_password.as_deref() {
        Some(admin_password) => {
            create_initial_admin_user(&config.admin_username, admin_password, config.password_hashing, &pool).await?
        }
        None => debug!("No admin_password configured, skipping admin seeding"),
    }

    Ok(pool)
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let cors_config = &config.cors;
    let wildcard = cors_config
        .allowed_origins
        .iter()
        .any(|origin| matches!(origin, CorsOrigin::Wildcard));

    let mut cors = if wildcard {
        CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
    } else {
        let mut origins = Vec::new();
        for origin in &cors_config.allowed_origins {
            if let CorsOrigin::Url(url) = origin {
                // Origins never carry a trailing slash
                origins.push(url.as_str().trim_end_matches('/').parse::<HeaderValue>()?);
            }
        }
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([http::Method::GET, http::Method::POST, http::Method::PUT, http::Method::DELETE])
            .allow_headers([http::header::CONTENT_TYPE])
            .allow_credentials(cors_config.allow_credentials)
    };

    if let Some(max_age) = cors_config.max_age {
        cors = cors.max_age(Duration::from_secs(max_age));
    }

    Ok(cors)
}

/// Build the main application router with all endpoints and middleware.
///
/// - `/api/*` JSON endpoints
/// - health checks and OpenAPI documentation
/// - static asset serving with SPA fallback
/// - CORS and request tracing layers
#[instrument(skip_all)]
pub fn build_router(state: &AppState) -> anyhow::Result<Router> {
    use api::handlers::{auth, comments, form_responses, health, name_surnames, static_assets, users};

    let api_routes = Router::new()
        .route("/login", post(auth::login))
        // Accounts
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{username}",
            get(users::get_user).put(users::update_user).delete(users::delete_user),
        )
        // Guest lists
        .route(
            "/namesurnames",
            get(name_surnames::list_name_surnames).post(name_surnames::create_name_surname),
        )
        .route("/namesurnames/{name_surname}", delete(name_surnames::delete_name_surname))
        .route("/name_surnames/{user_username}", get(name_surnames::list_user_name_surnames))
        // RSVPs
        .route(
            "/form_responses",
            get(form_responses::list_form_responses).post(form_responses::submit_form_response),
        )
        .route("/form_responses/{user_username}", get(form_responses::list_user_form_responses))
        // Comments
        .route("/comments", get(comments::list_comments).post(comments::create_comment))
        .route("/comments/{user_username}", get(comments::list_user_comments))
        .fallback(api::handlers::api_not_found);

    let router = Router::new()
        .route("/healthz", get(health::healthz))
        .route("/check-db-health", get(health::check_db_health))
        .nest("/api", api_routes)
        .with_state(state.clone())
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
        .fallback(static_assets::serve_embedded_asset);

    let router = router.layer(create_cors_layer(&state.config)?);

    let router = router.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::DEBUG))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

/// The assembled service: router plus the resources it owns.
///
/// 1. **Create**: [`Application::new`] connects, runs migrations and seeds the admin account
/// 2. **Serve**: [`Application::serve`] binds to the configured address and handles requests
/// 3. **Shutdown**: when the shutdown future resolves, in-flight requests finish and the pool closes
pub struct Application {
    router: Router,
    config: Config,
    pool: PgPool,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        Self::new_with_pool(config, None).await
    }

    /// Create an application on an existing pool (connects from config when `None`)
    pub async fn new_with_pool(config: Config, pool: Option<PgPool>) -> anyhow::Result<Self> {
        debug!("Starting rsvpctl with configuration: {:#?}", config);

        let pool = setup_database(&config, pool).await?;

        let app_state = AppState::builder().db(pool.clone()).config(config.clone()).build();
        let router = build_router(&app_state)?;

        Ok(Self { router, config, pool })
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!("rsvpctl listening on http://{}", bind_addr);

        axum::serve(listener, self.router).with_graceful_shutdown(shutdown).await?;

        info!("Closing database connections...");
        self.pool.close().await;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        api::models::{auth::LoginResponse, users::Role},
        config::CorsConfig,
        db::handlers::Repository,
        test_utils::*,
    };
    use serde_json::json;

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_initial_admin_user_is_idempotent(pool: PgPool) {
        let params = password::Argon2Params::insecure_fast();

        create_initial_admin_user("admin", "first", params, &pool).await.unwrap();
        create_initial_admin_user("admin", "second", params, &pool).await.unwrap();

        let mut conn = pool.acquire().await.unwrap();
        let admin = Users::new(&mut conn).get_by_id("admin".to_string()).await.unwrap().unwrap();
        assert_eq!(admin.role, Role::Admin);
        assert!(password::verify_password("second", &admin.password_hash).unwrap());
        assert!(!password::verify_password("first", &admin.password_hash).unwrap());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_application_seeds_admin_from_config(pool: PgPool) {
        let mut config = create_test_config();
        config.admin_username = "couple".to_string();
        config.admin_password = Some("letmein".to_string());

        let server = Application::new_with_pool(config, Some(pool))
            .await
            .unwrap()
            .into_test_server();

        let response = server
            .post("/api/login")
            .json(&json!({"username": "couple", "password": "letmein"}))
            .await;
        response.assert_status_ok();
        let body: LoginResponse = response.json();
        assert_eq!(body.role, Role::Admin);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_openapi_and_docs_are_served(pool: PgPool) {
        let server = create_test_app(pool).await;

        let spec = server.get("/api-docs/openapi.json").await;
        spec.assert_status_ok();
        let text = spec.text();
        assert!(text.contains("\"openapi\""));
        assert!(text.contains("/api/form_responses"));

        server.get("/docs").await.assert_status_ok();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_unknown_paths_fall_back_to_frontend(pool: PgPool) {
        let server = create_test_app(pool).await;

        let response = server.get("/guest/alice").await;
        response.assert_status_ok();
        assert!(response.text().contains("Wedding RSVP"));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_unknown_api_paths_are_json_not_found(pool: PgPool) {
        let server = create_test_app(pool).await;

        let response = server.get("/api/userz").await;
        response.assert_status(http::StatusCode::NOT_FOUND);
        response.assert_json(&json!({"error": "Endpoint not found"}));

        let nested = server.get("/api/users/alice/extra").await;
        nested.assert_status(http::StatusCode::NOT_FOUND);
        nested.assert_json(&json!({"error": "Endpoint not found"}));
    }

    #[test]
    fn test_cors_layer_accepts_wildcard_and_explicit_origins() {
        let mut config = create_test_config();
        assert!(create_cors_layer(&config).is_ok());

        config.cors = CorsConfig {
            allowed_origins: vec![CorsOrigin::Url("https://wedding.example.com/".parse().unwrap())],
            allow_credentials: true,
            max_age: None,
        };
        assert!(create_cors_layer(&config).is_ok());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_cors_preflight_allows_any_origin_by_default(pool: PgPool) {
        let server = create_test_app(pool).await;

        let response = server
            .method(http::Method::OPTIONS, "/api/users")
            .add_header("origin", "http://localhost:3000")
            .add_header("access-control-request-method", "POST")
            .await;

        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .map(|v| v.to_str().unwrap()),
            Some("*")
        );
    }
}
