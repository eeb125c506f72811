use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    AppState,
    api::{
        extractors::ApiJson,
        models::{
            ErrorResponse, MessageResponse, non_empty,
            users::{CreatedUserResponse, Role, UserCreate, UserResponse, UserSummary, UserUpdate},
        },
    },
    auth::password,
    db::{
        handlers::{Repository, Users, users::UserFilter},
        models::users::{UserCreateDBRequest, UserUpdateDBRequest},
    },
    errors::Error,
};

fn user_not_found(username: &str) -> Error {
    Error::NotFound {
        resource: "User".to_string(),
        id: username.to_string(),
    }
}

/// List all users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    responses(
        (status = 200, description = "All accounts ordered by username", body = [UserResponse]),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let users = Users::new(&mut conn).list(&UserFilter::default()).await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Get a single user
#[utoipa::path(
    get,
    path = "/api/users/{username}",
    tag = "users",
    params(("username" = String, Path, description = "Account username")),
    responses(
        (status = 200, description = "User found", body = UserSummary),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip_all, fields(username = %username))]
pub async fn get_user(State(state): State<AppState>, Path(username): Path<String>) -> Result<Json<UserSummary>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let user = Users::new(&mut conn)
        .get_by_id(username.clone())
        .await?
        .ok_or_else(|| user_not_found(&username))?;

    Ok(Json(UserSummary::from(user)))
}

/// Create a user account
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = UserCreate,
    tag = "users",
    responses(
        (status = 201, description = "User created; the plaintext password is echoed back", body = CreatedUserResponse),
        (status = 400, description = "Missing fields or username taken", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<UserCreate>,
) -> Result<(StatusCode, Json<CreatedUserResponse>), Error> {
    let (Some(username), Some(password)) = (non_empty(&request.username), non_empty(&request.password)) else {
        return Err(Error::BadRequest {
            message: "username and password are required".to_string(),
        });
    };

    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Users::new(&mut tx);

    // A concurrent insert that slips past this check hits the primary key instead
    if repo.get_by_id(username.to_string()).await?.is_some() {
        return Err(Error::Conflict {
            message: "Username already exists".to_string(),
        });
    }

    let password_hash = password::hash_password_blocking(password.to_string(), state.config.password_hashing).await?;
    let created = repo
        .create(&UserCreateDBRequest {
            username: username.to_string(),
            password_hash,
            role: request.role.unwrap_or_default(),
            personal_message: request.personal_message.clone().unwrap_or_default(),
        })
        .await?;

    tx.commit().await.map_err(|e| Error::Database(e.into()))?;
    tracing::info!(username = %created.username, role = %created.role, "user created");

    Ok((
        StatusCode::CREATED,
        Json(CreatedUserResponse {
            username: created.username,
            password: password.to_string(),
        }),
    ))
}

/// Update a user's personal message and/or password
#[utoipa::path(
    put,
    path = "/api/users/{username}",
    request_body = UserUpdate,
    tag = "users",
    params(("username" = String, Path, description = "Account username")),
    responses(
        (status = 200, description = "User updated", body = MessageResponse),
        (status = 400, description = "Empty password or malformed body", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip_all, fields(username = %username))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
    ApiJson(request): ApiJson<UserUpdate>,
) -> Result<Json<MessageResponse>, Error> {
    let password_hash = match request.password.as_deref() {
        Some("") => {
            return Err(Error::BadRequest {
                message: "password cannot be empty".to_string(),
            });
        }
        Some(password) => Some(password::hash_password_blocking(password.to_string(), state.config.password_hashing).await?),
        None => None,
    };

    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    Users::new(&mut tx)
        .update(&username, &UserUpdateDBRequest::new(&request, password_hash))
        .await
        .map_err(|e| match e {
            crate::db::errors::DbError::NotFound => user_not_found(&username),
            other => other.into(),
        })?;
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok(Json(MessageResponse::new("User updated successfully")))
}

/// Delete a user and, through the cascade, everything registered under it
#[utoipa::path(
    delete,
    path = "/api/users/{username}",
    tag = "users",
    params(("username" = String, Path, description = "Account username")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 403, description = "Admin accounts cannot be deleted", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip_all, fields(username = %username))]
pub async fn delete_user(State(state): State<AppState>, Path(username): Path<String>) -> Result<Json<MessageResponse>, Error> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Users::new(&mut tx);

    let user = repo
        .get_by_id(username.clone())
        .await?
        .ok_or_else(|| user_not_found(&username))?;

    if user.role == Role::Admin {
        return Err(Error::Forbidden {
            message: "Cannot delete admin user".to_string(),
        });
    }

    repo.delete(username.clone()).await?;
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;
    tracing::info!(username = %username, "user deleted");

    Ok(Json(MessageResponse::new("User deleted successfully")))
}

#[cfg(test)]
mod tests {
    use crate::{
        api::models::{
            MessageResponse,
            auth::LoginResponse,
            users::{Role, UserResponse, UserSummary},
        },
        test_utils::*,
    };
    use axum::http::StatusCode;
    use serde_json::json;
    use sqlx::PgPool;

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_user_echoes_credentials(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;

        let response = app
            .post("/api/users")
            .json(&json!({"username": "alice", "password": "pw1", "role": "guest"}))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.assert_json(&json!({"username": "alice", "password": "pw1"}));

        // The stored password is hashed, and the new credentials work
        let stored: String = sqlx::query_scalar("SELECT password_hash FROM users WHERE username = 'alice'")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_ne!(stored, "pw1");

        let login = app
            .post("/api/login")
            .json(&json!({"username": "alice", "password": "pw1"}))
            .await;
        login.assert_status_ok();
        let body: LoginResponse = login.json();
        assert_eq!(body.role, Role::Guest);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_user_defaults_role_and_message(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;

        app.post("/api/users")
            .json(&json!({"username": "bob", "password": "pw"}))
            .await
            .assert_status(StatusCode::CREATED);

        let response = app.get("/api/users").await;
        response.assert_status_ok();
        let users: Vec<UserResponse> = response.json();
        assert_eq!(users, vec![UserResponse {
            username: "bob".to_string(),
            role: Role::Guest,
            personal_message: String::new(),
        }]);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_null_personal_message_is_served_as_empty_string(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        create_test_user(&pool, "carol", "pw", Role::Guest).await;
        sqlx::query("UPDATE users SET personal_message = NULL WHERE username = 'carol'")
            .execute(&pool)
            .await
            .unwrap();

        let users: serde_json::Value = app.get("/api/users").await.json();
        assert_eq!(users[0]["personal_message"], json!(""));

        let user: serde_json::Value = app.get("/api/users/carol").await.json();
        assert_eq!(user["personal_message"], json!(""));

        let login: LoginResponse = app
            .post("/api/login")
            .json(&json!({"username": "carol", "password": "pw"}))
            .await
            .json();
        assert_eq!(login.personal_message, "");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_duplicate_user_is_rejected_and_row_kept(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;

        app.post("/api/users")
            .json(&json!({"username": "alice", "password": "pw1", "role": "guest", "personal_message": "hi"}))
            .await
            .assert_status(StatusCode::CREATED);

        let response = app
            .post("/api/users")
            .json(&json!({"username": "alice", "password": "other", "role": "admin"}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({"error": "Username already exists"}));

        let users: Vec<UserResponse> = app.get("/api/users").await.json();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].role, Role::Guest);
        assert_eq!(users[0].personal_message, "hi");

        app.post("/api/login")
            .json(&json!({"username": "alice", "password": "pw1"}))
            .await
            .assert_status_ok();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_user_requires_username_and_password(pool: PgPool) {
        let app = create_test_app(pool).await;

        for body in [
            json!({"password": "pw"}),
            json!({"username": "alice"}),
            json!({"username": "", "password": "pw"}),
        ] {
            let response = app.post("/api/users").json(&body).await;
            response.assert_status(StatusCode::BAD_REQUEST);
            response.assert_json(&json!({"error": "username and password are required"}));
        }
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_list_users_hides_password_hash(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        create_test_user(&pool, "zoe", "pw", Role::Guest).await;
        create_test_user(&pool, "adam", "pw", Role::Admin).await;

        let response = app.get("/api/users").await;
        response.assert_status_ok();

        let raw: serde_json::Value = response.json();
        assert!(!raw.to_string().contains("password"));

        let users: Vec<UserResponse> = response.json();
        let names: Vec<_> = users.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["adam", "zoe"]);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_get_user(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        create_test_user(&pool, "alice", "pw", Role::Guest).await;

        let response = app.get("/api/users/alice").await;
        response.assert_status_ok();
        let user: UserSummary = response.json();
        assert_eq!(user.username, "alice");

        let missing = app.get("/api/users/ghost").await;
        missing.assert_status(StatusCode::NOT_FOUND);
        missing.assert_json(&json!({"error": "User not found"}));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_update_user_message_and_password(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        create_test_user(&pool, "alice", "old", Role::Guest).await;

        let response = app
            .put("/api/users/alice")
            .json(&json!({"personal_message": "Welcome Alice!"}))
            .await;
        response.assert_status_ok();
        let body: MessageResponse = response.json();
        assert_eq!(body.message, "User updated successfully");

        // Password untouched by a message-only update
        app.post("/api/login")
            .json(&json!({"username": "alice", "password": "old"}))
            .await
            .assert_status_ok();

        app.put("/api/users/alice")
            .json(&json!({"password": "new"}))
            .await
            .assert_status_ok();

        app.post("/api/login")
            .json(&json!({"username": "alice", "password": "old"}))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
        let login: LoginResponse = app
            .post("/api/login")
            .json(&json!({"username": "alice", "password": "new"}))
            .await
            .json();
        assert_eq!(login.personal_message, "Welcome Alice!");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_update_with_empty_password_is_rejected(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        create_test_user(&pool, "alice", "old", Role::Guest).await;

        let response = app.put("/api/users/alice").json(&json!({"password": ""})).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({"error": "password cannot be empty"}));

        app.post("/api/login")
            .json(&json!({"username": "alice", "password": "old"}))
            .await
            .assert_status_ok();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_user_with_unknown_role_is_bad_request(pool: PgPool) {
        let app = create_test_app(pool).await;

        let response = app
            .post("/api/users")
            .json(&json!({"username": "mallory", "password": "pw", "role": "superuser"}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert!(body["error"].as_str().unwrap().contains("superuser"));

        let users: Vec<UserResponse> = app.get("/api/users").await.json();
        assert!(users.is_empty());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_update_missing_user_is_not_found(pool: PgPool) {
        let app = create_test_app(pool).await;

        let response = app.put("/api/users/ghost").json(&json!({"personal_message": "x"})).await;
        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json(&json!({"error": "User not found"}));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_delete_user_cascades(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        create_test_user(&pool, "alice", "pw", Role::Guest).await;
        create_test_name_surname(&pool, "alice", "Alice Smith").await;

        app.post("/api/form_responses")
            .json(&json!({"user_username": "alice", "name_surname": "Alice Smith", "accepted": true, "menu_option": "fish"}))
            .await
            .assert_status(StatusCode::CREATED);
        app.post("/api/comments")
            .json(&json!({"user_username": "alice", "comment": "Yay"}))
            .await
            .assert_status(StatusCode::CREATED);

        let response = app.delete("/api/users/alice").await;
        response.assert_status_ok();
        response.assert_json(&json!({"message": "User deleted successfully"}));

        let names: Vec<serde_json::Value> = app.get("/api/namesurnames").await.json();
        let responses: Vec<serde_json::Value> = app.get("/api/form_responses").await.json();
        let comments: Vec<serde_json::Value> = app.get("/api/comments").await.json();
        assert!(names.is_empty());
        assert!(responses.is_empty());
        assert!(comments.is_empty());

        app.delete("/api/users/alice").await.assert_status(StatusCode::NOT_FOUND);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_admin_cannot_be_deleted(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        create_test_user(&pool, "boss", "pw", Role::Admin).await;

        let response = app.delete("/api/users/boss").await;
        response.assert_status(StatusCode::FORBIDDEN);
        response.assert_json(&json!({"error": "Cannot delete admin user"}));

        app.get("/api/users/boss").await.assert_status_ok();
    }
}
