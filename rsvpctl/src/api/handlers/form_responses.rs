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
            ErrorResponse, MessageResponse,
            form_responses::{FormResponseResponse, FormResponseSubmit},
            non_empty,
        },
    },
    db::{handlers::FormResponses, models::form_responses::FormResponseUpsertDBRequest},
    errors::Error,
};

/// List every RSVP
#[utoipa::path(
    get,
    path = "/api/form_responses",
    tag = "form_responses",
    responses(
        (status = 200, description = "All responses", body = [FormResponseResponse]),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_form_responses(State(state): State<AppState>) -> Result<Json<Vec<FormResponseResponse>>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let responses = FormResponses::new(&mut conn).list().await?;

    Ok(Json(responses.into_iter().map(FormResponseResponse::from).collect()))
}

/// List the RSVPs for the guest-list entries of one user
#[utoipa::path(
    get,
    path = "/api/form_responses/{user_username}",
    tag = "form_responses",
    params(("user_username" = String, Path, description = "Owning account")),
    responses(
        (status = 200, description = "Responses for the user's entries", body = [FormResponseResponse]),
    )
)]
#[tracing::instrument(skip_all, fields(user = %user_username))]
pub async fn list_user_form_responses(
    State(state): State<AppState>,
    Path(user_username): Path<String>,
) -> Result<Json<Vec<FormResponseResponse>>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let responses = FormResponses::new(&mut conn).list_for_user(&user_username).await?;

    Ok(Json(responses.into_iter().map(FormResponseResponse::from).collect()))
}

/// Submit an RSVP, replacing any earlier one for the same entry
#[utoipa::path(
    post,
    path = "/api/form_responses",
    request_body = FormResponseSubmit,
    tag = "form_responses",
    responses(
        (status = 201, description = "Response stored", body = MessageResponse),
        (status = 400, description = "Missing fields, missing menu option or unregistered entry", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn submit_form_response(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<FormResponseSubmit>,
) -> Result<(StatusCode, Json<MessageResponse>), Error> {
    let (Some(user_username), Some(name_surname)) = (non_empty(&request.user_username), non_empty(&request.name_surname)) else {
        return Err(Error::BadRequest {
            message: "user_username and name_surname are required".to_string(),
        });
    };

    if request.accepted == Some(true) && non_empty(&request.menu_option).is_none() {
        return Err(Error::BadRequest {
            message: "Menu option is required if the invitation is accepted.".to_string(),
        });
    }

    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let stored = FormResponses::new(&mut tx)
        .upsert(&FormResponseUpsertDBRequest {
            user_username: user_username.to_string(),
            name_surname: name_surname.to_string(),
            accepted: request.accepted,
            menu_option: request.menu_option.clone().unwrap_or_default(),
            allergies: request.allergies.clone().unwrap_or_default(),
            comment: request.comment.clone().unwrap_or_default(),
        })
        .await?;
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;
    tracing::info!(user = %stored.user_username, accepted = ?stored.accepted, "form response stored");

    Ok((StatusCode::CREATED, Json(MessageResponse::new("Form response submitted successfully"))))
}
