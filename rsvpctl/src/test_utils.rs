//! Shared fixtures for handler and application tests.

use crate::{
    api::models::users::Role,
    auth::password::{self, Argon2Params},
    config::{Config, PoolSettings},
    db::{
        handlers::{NameSurnames, Repository, Users},
        models::{
            name_surnames::{NameSurnameCreateDBRequest, NameSurnameDBResponse},
            users::{UserCreateDBRequest, UserDBResponse},
        },
    },
};
use axum_test::TestServer;
use sqlx::PgPool;

/// Build a test server on a pool provided by `#[sqlx::test]`.
pub async fn create_test_app(pool: PgPool) -> TestServer {
    let config = create_test_config();

    crate::Application::new_with_pool(config, Some(pool))
        .await
        .expect("Failed to create application")
        .into_test_server()
}

pub fn create_test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        // Unused: tests hand in their own pool
        connection_uri: "postgresql://localhost/rsvp_test".to_string(),
        debug_enabled: true,
        pool: PoolSettings {
            max_connections: 1,
            min_connections: 0,
            ..Default::default()
        },
        admin_password: None,
        password_hashing: Argon2Params::insecure_fast(),
        ..Default::default()
    }
}

pub async fn create_test_user(pool: &PgPool, username: &str, raw_password: &str, role: Role) -> UserDBResponse {
    let password_hash =
        password::hash_password(raw_password, Argon2Params::insecure_fast()).expect("Failed to hash test password");

    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    Users::new(&mut conn)
        .create(&UserCreateDBRequest {
            username: username.to_string(),
            password_hash,
            role,
            personal_message: String::new(),
        })
        .await
        .expect("Failed to create test user")
}

pub async fn create_test_name_surname(pool: &PgPool, user_username: &str, name_surname: &str) -> NameSurnameDBResponse {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    NameSurnames::new(&mut conn)
        .create(&NameSurnameCreateDBRequest {
            user_username: user_username.to_string(),
            name_surname: name_surname.to_string(),
        })
        .await
        .expect("Failed to create test name and surname")
}
