//! OpenAPI documentation for the RSVP API.
//!
//! The document is served at `/api-docs/openapi.json` and rendered with Scalar at `/docs`.

use utoipa::OpenApi;

use crate::api::{self, models};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Wedding RSVP API",
        description = "Guest accounts, guest lists, RSVP responses and comments"
    ),
    paths(
        api::handlers::auth::login,
        api::handlers::users::list_users,
        api::handlers::users::get_user,
        api::handlers::users::create_user,
        api::handlers::users::update_user,
        api::handlers::users::delete_user,
        api::handlers::name_surnames::list_name_surnames,
        api::handlers::name_surnames::list_user_name_surnames,
        api::handlers::name_surnames::create_name_surname,
        api::handlers::name_surnames::delete_name_surname,
        api::handlers::form_responses::list_form_responses,
        api::handlers::form_responses::list_user_form_responses,
        api::handlers::form_responses::submit_form_response,
        api::handlers::comments::list_comments,
        api::handlers::comments::list_user_comments,
        api::handlers::comments::create_comment,
        api::handlers::health::check_db_health,
        api::handlers::health::healthz,
    ),
    components(
        schemas(
            models::MessageResponse,
            models::ErrorResponse,
            models::auth::LoginRequest,
            models::auth::LoginResponse,
            models::users::Role,
            models::users::UserCreate,
            models::users::UserUpdate,
            models::users::UserResponse,
            models::users::UserSummary,
            models::users::CreatedUserResponse,
            models::name_surnames::NameSurnameCreate,
            models::name_surnames::NameSurnameCreated,
            models::name_surnames::NameSurnameResponse,
            models::name_surnames::UserNameSurnameResponse,
            models::form_responses::FormResponseSubmit,
            models::form_responses::FormResponseResponse,
            models::comments::CommentCreate,
            models::comments::CommentResponse,
        )
    ),
    tags(
        (name = "authentication", description = "Credential checks"),
        (name = "users", description = "Guest account management"),
        (name = "name_surnames", description = "Guest-list entries registered under an account"),
        (name = "form_responses", description = "RSVP submissions"),
        (name = "comments", description = "Messages left by guests"),
        (name = "health", description = "Liveness checks"),
    )
)]
pub struct ApiDoc;
