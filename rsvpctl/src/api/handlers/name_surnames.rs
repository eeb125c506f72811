use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::{
    AppState,
    api::{
        extractors::ApiJson,
        models::{
            ErrorResponse, MessageResponse,
            name_surnames::{DeleteNameSurnameQuery, NameSurnameCreate, NameSurnameCreated, NameSurnameResponse, UserNameSurnameResponse},
            non_empty,
        },
    },
    db::{
        handlers::{FormResponses, NameSurnames, Repository, name_surnames::NameSurnameFilter},
        models::name_surnames::{NameSurnameCreateDBRequest, NameSurnameKey},
    },
    errors::Error,
};

/// List every guest-list entry
#[utoipa::path(
    get,
    path = "/api/namesurnames",
    tag = "name_surnames",
    responses(
        (status = 200, description = "All entries", body = [NameSurnameResponse]),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_name_surnames(State(state): State<AppState>) -> Result<Json<Vec<NameSurnameResponse>>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let entries = NameSurnames::new(&mut conn).list(&NameSurnameFilter::default()).await?;

    Ok(Json(entries.into_iter().map(NameSurnameResponse::from).collect()))
}

/// List the entries registered under one user
#[utoipa::path(
    get,
    path = "/api/name_surnames/{user_username}",
    tag = "name_surnames",
    params(("user_username" = String, Path, description = "Owning account")),
    responses(
        (status = 200, description = "Entries for the user (empty for unknown users)", body = [UserNameSurnameResponse]),
    )
)]
#[tracing::instrument(skip_all, fields(user = %user_username))]
pub async fn list_user_name_surnames(
    State(state): State<AppState>,
    Path(user_username): Path<String>,
) -> Result<Json<Vec<UserNameSurnameResponse>>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let entries = NameSurnames::new(&mut conn)
        .list(&NameSurnameFilter::for_user(user_username))
        .await?;

    Ok(Json(entries.into_iter().map(UserNameSurnameResponse::from).collect()))
}

/// Register a name under a user
#[utoipa::path(
    post,
    path = "/api/namesurnames",
    request_body = NameSurnameCreate,
    tag = "name_surnames",
    responses(
        (status = 201, description = "Entry added", body = NameSurnameCreated),
        (status = 400, description = "Missing fields, duplicate entry or unknown user", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_name_surname(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<NameSurnameCreate>,
) -> Result<(StatusCode, Json<NameSurnameCreated>), Error> {
    let (Some(user_username), Some(name_surname)) = (non_empty(&request.user_username), non_empty(&request.name_surname)) else {
        return Err(Error::BadRequest {
            message: "user_username and name_surname are required".to_string(),
        });
    };

    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = NameSurnames::new(&mut tx);

    let key = NameSurnameKey {
        user_username: user_username.to_string(),
        name_surname: name_surname.to_string(),
    };
    if repo.get_by_id(key).await?.is_some() {
        return Err(Error::Conflict {
            message: "Name and surname already exists for this user".to_string(),
        });
    }

    let created = repo
        .create(&NameSurnameCreateDBRequest {
            user_username: user_username.to_string(),
            name_surname: name_surname.to_string(),
        })
        .await?;
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok((
        StatusCode::CREATED,
        Json(NameSurnameCreated {
            name_surname: created.name_surname,
            message: "Name and surname added successfully".to_string(),
        }),
    ))
}

/// Delete a guest-list entry together with its RSVPs
///
/// Without `user_username`, every entry with this name is removed, across all users.
#[utoipa::path(
    delete,
    path = "/api/namesurnames/{name_surname}",
    tag = "name_surnames",
    params(
        ("name_surname" = String, Path, description = "Name and surname to remove"),
        DeleteNameSurnameQuery,
    ),
    responses(
        (status = 200, description = "Entry and its RSVPs deleted", body = MessageResponse),
        (status = 404, description = "No matching entry", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip_all, fields(user = ?query.user_username))]
pub async fn delete_name_surname(
    State(state): State<AppState>,
    Path(name_surname): Path<String>,
    Query(query): Query<DeleteNameSurnameQuery>,
) -> Result<Json<MessageResponse>, Error> {
    let scope = non_empty(&query.user_username);
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;

    // RSVPs first, then the entries they reference
    let swept = FormResponses::new(&mut tx)
        .delete_for_name_surname(&name_surname, scope)
        .await?;

    let mut repo = NameSurnames::new(&mut tx);
    let deleted = match scope {
        Some(user_username) => repo
            .delete(NameSurnameKey {
                user_username: user_username.to_string(),
                name_surname: name_surname.clone(),
            })
            .await? as u64,
        None => repo.delete_by_name(&name_surname).await?,
    };

    if deleted == 0 {
        // Dropping the transaction also undoes the sweep
        return Err(Error::NotFound {
            resource: "Name and surname".to_string(),
            id: name_surname,
        });
    }

    tx.commit().await.map_err(|e| Error::Database(e.into()))?;
    tracing::info!(entries = deleted, responses = swept, "name and surname deleted");

    Ok(Json(MessageResponse::new("Name and surname deleted successfully")))
}
