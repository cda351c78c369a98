//! User account management endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, models::user::CreateUser};

use super::AuthenticatedUser;

/// Create user response
#[derive(Serialize, ToSchema)]
pub struct CreateUserResponse {
    pub id: i32,
    pub message: String,
}

/// Create a user account (admin only)
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    security(("bearer_auth" = [])),
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = CreateUserResponse),
        (status = 409, description = "Username already in use")
    )
)]
pub async fn create_user(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<CreateUserResponse>)> {
    claims.require_admin()?;

    let id = state.services.auth.create_user(&request).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateUserResponse {
            id,
            message: "User created".to_string(),
        }),
    ))
}
