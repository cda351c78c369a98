//! Property management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::property::{CreateProperty, Property, UpdateProperty},
};

use super::AuthenticatedUser;

/// List active properties
#[utoipa::path(
    get,
    path = "/properties",
    tag = "properties",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Active properties", body = Vec<Property>)
    )
)]
pub async fn list_properties(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Property>>> {
    let properties = state.services.properties.list_active().await?;
    Ok(Json(properties))
}

/// Get property by ID
#[utoipa::path(
    get,
    path = "/properties/{id}",
    tag = "properties",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Property ID")),
    responses(
        (status = 200, description = "Property details", body = Property),
        (status = 404, description = "Property not found")
    )
)]
pub async fn get_property(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Property>> {
    let property = state.services.properties.get_by_id(id).await?;
    Ok(Json(property))
}

/// Create a property (admin only)
#[utoipa::path(
    post,
    path = "/properties",
    tag = "properties",
    security(("bearer_auth" = [])),
    request_body = CreateProperty,
    responses(
        (status = 201, description = "Property created", body = Property)
    )
)]
pub async fn create_property(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateProperty>,
) -> AppResult<(StatusCode, Json<Property>)> {
    claims.require_admin()?;

    let property = state.services.properties.create(&claims, &data).await?;
    Ok((StatusCode::CREATED, Json(property)))
}

/// Update a property (admin only)
#[utoipa::path(
    put,
    path = "/properties/{id}",
    tag = "properties",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Property ID")),
    request_body = UpdateProperty,
    responses(
        (status = 200, description = "Property updated", body = Property),
        (status = 404, description = "Property not found")
    )
)]
pub async fn update_property(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateProperty>,
) -> AppResult<Json<Property>> {
    claims.require_admin()?;

    let property = state.services.properties.update(&claims, id, &data).await?;
    Ok(Json(property))
}

/// Soft-delete the property row only (admin only)
#[utoipa::path(
    delete,
    path = "/properties/{id}",
    tag = "properties",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Property ID")),
    responses(
        (status = 204, description = "Property deactivated")
    )
)]
pub async fn delete_property(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;

    state.services.properties.deactivate(&claims, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Soft-delete a property together with its areas, schedules and employees
/// (admin only)
#[utoipa::path(
    delete,
    path = "/properties/{id}/cascade",
    tag = "properties",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Property ID")),
    responses(
        (status = 204, description = "Property and dependents deactivated")
    )
)]
pub async fn delete_property_cascade(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;

    state.services.properties.deactivate_cascade(&claims, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
