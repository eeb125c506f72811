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
            comments::{CommentCreate, CommentResponse},
            non_empty,
        },
    },
    db::{
        handlers::{GuestComments, comments::GuestCommentFilter},
        models::comments::GuestCommentCreateDBRequest,
    },
    errors::Error,
};

/// List every comment
#[utoipa::path(
    get,
    path = "/api/comments",
    tag = "comments",
    responses(
        (status = 200, description = "All comments", body = [CommentResponse]),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_comments(State(state): State<AppState>) -> Result<Json<Vec<CommentResponse>>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let comments = GuestComments::new(&mut conn).list(&GuestCommentFilter::default()).await?;

    Ok(Json(comments.into_iter().map(CommentResponse::from).collect()))
}

/// List the comments left by one user
#[utoipa::path(
    get,
    path = "/api/comments/{user_username}",
    tag = "comments",
    params(("user_username" = String, Path, description = "Author account")),
    responses(
        (status = 200, description = "Comments by the user", body = [CommentResponse]),
    )
)]
#[tracing::instrument(skip_all, fields(user = %user_username))]
pub async fn list_user_comments(
    State(state): State<AppState>,
    Path(user_username): Path<String>,
) -> Result<Json<Vec<CommentResponse>>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let comments = GuestComments::new(&mut conn)
        .list(&GuestCommentFilter {
            user_username: Some(user_username),
        })
        .await?;

    Ok(Json(comments.into_iter().map(CommentResponse::from).collect()))
}

/// Leave a comment
#[utoipa::path(
    post,
    path = "/api/comments",
    request_body = CommentCreate,
    tag = "comments",
    responses(
        (status = 201, description = "Comment stored", body = MessageResponse),
        (status = 400, description = "Missing fields, repeated comment or unknown user", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_comment(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CommentCreate>,
) -> Result<(StatusCode, Json<MessageResponse>), Error> {
    let (Some(user_username), Some(comment)) = (non_empty(&request.user_username), non_empty(&request.comment)) else {
        return Err(Error::BadRequest {
            message: "user_username and comment are required".to_string(),
        });
    };

    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    GuestComments::new(&mut tx)
        .create(&GuestCommentCreateDBRequest {
            user_username: user_username.to_string(),
            comment: comment.to_string(),
        })
        .await?;
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok((StatusCode::CREATED, Json(MessageResponse::new("Comment submitted successfully"))))
}

#[cfg(test)]
mod tests {
    use crate::{
        api::models::{comments::CommentResponse, users::Role},
        test_utils::*,
    };
    use axum::http::StatusCode;
    use serde_json::json;
    use sqlx::PgPool;

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_and_list_comments(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        create_test_user(&pool, "alice", "pw", Role::Guest).await;
        create_test_user(&pool, "bob", "pw", Role::Guest).await;

        for (user, text) in [("alice", "Congratulations!"), ("alice", "See you there"), ("bob", "Congratulations!")] {
            let response = app
                .post("/api/comments")
                .json(&json!({"user_username": user, "comment": text}))
                .await;
            response.assert_status(StatusCode::CREATED);
            response.assert_json(&json!({"message": "Comment submitted successfully"}));
        }

        let all: Vec<CommentResponse> = app.get("/api/comments").await.json();
        assert_eq!(all.len(), 3);

        let bob: Vec<CommentResponse> = app.get("/api/comments/bob").await.json();
        assert_eq!(bob, vec![CommentResponse {
            user_username: "bob".to_string(),
            comment: "Congratulations!".to_string(),
        }]);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_repeated_comment_is_rejected(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        create_test_user(&pool, "alice", "pw", Role::Guest).await;

        let body = json!({"user_username": "alice", "comment": "Congratulations!"});
        app.post("/api/comments").json(&body).await.assert_status(StatusCode::CREATED);

        let response = app.post("/api/comments").json(&body).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({"error": "Comment already exists"}));

        let all: Vec<CommentResponse> = app.get("/api/comments").await.json();
        assert_eq!(all.len(), 1);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_comment_validation(pool: PgPool) {
        let app = create_test_app(pool).await;

        let missing = app.post("/api/comments").json(&json!({"user_username": "alice"})).await;
        missing.assert_status(StatusCode::BAD_REQUEST);
        missing.assert_json(&json!({"error": "user_username and comment are required"}));

        let unknown = app
            .post("/api/comments")
            .json(&json!({"user_username": "ghost", "comment": "boo"}))
            .await;
        unknown.assert_status(StatusCode::BAD_REQUEST);
        unknown.assert_json(&json!({"error": "User does not exist"}));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_non_json_body_is_bad_request(pool: PgPool) {
        let app = create_test_app(pool).await;

        let response = app.post("/api/comments").text("not json").await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert!(body["error"].is_string());
    }
}
