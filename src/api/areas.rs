//! Area management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::area::{AreaDetails, CreateArea, UpdateArea},
};

use super::AuthenticatedUser;

/// List active areas with their property labels
#[utoipa::path(
    get,
    path = "/areas",
    tag = "areas",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Active areas", body = Vec<AreaDetails>)
    )
)]
pub async fn list_areas(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<AreaDetails>>> {
    let areas = state.services.areas.list_active().await?;
    Ok(Json(areas))
}

/// Get area by ID
#[utoipa::path(
    get,
    path = "/areas/{id}",
    tag = "areas",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Area ID")),
    responses(
        (status = 200, description = "Area details", body = AreaDetails),
        (status = 404, description = "Area not found")
    )
)]
pub async fn get_area(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<AreaDetails>> {
    let area = state.services.areas.get_by_id(id).await?;
    Ok(Json(area))
}

/// Create an area linked to a property (admin only)
#[utoipa::path(
    post,
    path = "/areas",
    tag = "areas",
    security(("bearer_auth" = [])),
    request_body = CreateArea,
    responses(
        (status = 201, description = "Area created", body = AreaDetails)
    )
)]
pub async fn create_area(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateArea>,
) -> AppResult<(StatusCode, Json<AreaDetails>)> {
    claims.require_admin()?;

    let area = state.services.areas.create(&claims, &data).await?;
    Ok((StatusCode::CREATED, Json(area)))
}

/// Update an area and its property link (admin only)
#[utoipa::path(
    put,
    path = "/areas/{id}",
    tag = "areas",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Area ID")),
    request_body = UpdateArea,
    responses(
        (status = 200, description = "Area updated", body = AreaDetails),
        (status = 404, description = "Area not found")
    )
)]
pub async fn update_area(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateArea>,
) -> AppResult<Json<AreaDetails>> {
    claims.require_admin()?;

    let area = state.services.areas.update(&claims, id, &data).await?;
    Ok(Json(area))
}

/// Soft-delete an area (admin only); employees are left unassigned
#[utoipa::path(
    delete,
    path = "/areas/{id}",
    tag = "areas",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Area ID")),
    responses(
        (status = 204, description = "Area deactivated")
    )
)]
pub async fn delete_area(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;

    state.services.areas.deactivate(&claims, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
