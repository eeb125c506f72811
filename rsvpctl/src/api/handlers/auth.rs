use axum::{Json, extract::State};

use crate::{
    AppState,
    api::{
        extractors::ApiJson,
        models::{
            auth::{LoginRequest, LoginResponse},
            non_empty,
        },
    },
    auth::password,
    db::handlers::{Repository, Users},
    errors::Error,
};

fn invalid_credentials() -> Error {
    Error::Unauthenticated {
        message: Some("Invalid credentials".to_string()),
    }
}

/// Check a username/password pair
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    tag = "authentication",
    responses(
        (status = 200, description = "Credentials accepted", body = LoginResponse),
        (status = 401, description = "Unknown user or wrong password", body = crate::api::models::ErrorResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, Error> {
    let (Some(username), Some(password)) = (non_empty(&request.username), request.password) else {
        return Err(invalid_credentials());
    };

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let user = Users::new(&mut conn)
        .get_by_id(username.to_string())
        .await?
        .ok_or_else(invalid_credentials)?;

    // Same response for unknown user and wrong password
    if !password::verify_password_blocking(password, user.password_hash.clone()).await? {
        return Err(invalid_credentials());
    }

    tracing::debug!(username = %user.username, role = %user.role, "login succeeded");

    Ok(Json(LoginResponse {
        role: user.role,
        personal_message: user.personal_message.unwrap_or_default(),
        username: user.username,
    }))
}
