//! Schedule management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        area::AreaLinkOption,
        schedule::{AvailableLinksQuery, CreateSchedule, ScheduleDetails, UpdateSchedule},
    },
};

use super::AuthenticatedUser;

/// Create schedule response
#[derive(Serialize, ToSchema)]
pub struct CreateScheduleResponse {
    pub id: i32,
}

/// List active schedules with their bindings
#[utoipa::path(
    get,
    path = "/schedules",
    tag = "schedules",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Active schedules", body = Vec<ScheduleDetails>)
    )
)]
pub async fn list_schedules(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<ScheduleDetails>>> {
    let schedules = state.services.schedules.list_active().await?;
    Ok(Json(schedules))
}

/// Area links without an active schedule
#[utoipa::path(
    get,
    path = "/schedules/available-links",
    tag = "schedules",
    security(("bearer_auth" = [])),
    params(AvailableLinksQuery),
    responses(
        (status = 200, description = "Assignable area links", body = Vec<AreaLinkOption>)
    )
)]
pub async fn available_links(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<AvailableLinksQuery>,
) -> AppResult<Json<Vec<AreaLinkOption>>> {
    let links = state
        .services
        .schedules
        .available_links(query.editing_schedule_id)
        .await?;
    Ok(Json(links))
}

/// Get schedule by ID
#[utoipa::path(
    get,
    path = "/schedules/{id}",
    tag = "schedules",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Schedule ID")),
    responses(
        (status = 200, description = "Schedule details", body = ScheduleDetails),
        (status = 404, description = "Schedule not found")
    )
)]
pub async fn get_schedule(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ScheduleDetails>> {
    let schedule = state.services.schedules.get_by_id(id).await?;
    Ok(Json(schedule))
}

/// Create a schedule bound to an area link (admin only)
#[utoipa::path(
    post,
    path = "/schedules",
    tag = "schedules",
    security(("bearer_auth" = [])),
    request_body = CreateSchedule,
    responses(
        (status = 201, description = "Schedule created", body = CreateScheduleResponse),
        (status = 409, description = "Area link already has an active schedule")
    )
)]
pub async fn create_schedule(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateSchedule>,
) -> AppResult<(StatusCode, Json<CreateScheduleResponse>)> {
    claims.require_admin()?;

    let id = state.services.schedules.create(&claims, &data).await?;
    Ok((StatusCode::CREATED, Json(CreateScheduleResponse { id })))
}

/// Update a schedule (admin only)
#[utoipa::path(
    put,
    path = "/schedules/{id}",
    tag = "schedules",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Schedule ID")),
    request_body = UpdateSchedule,
    responses(
        (status = 200, description = "Schedule updated"),
        (status = 404, description = "Schedule not found")
    )
)]
pub async fn update_schedule(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateSchedule>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;

    state.services.schedules.update(&claims, id, &data).await?;
    Ok(StatusCode::OK)
}

/// Soft-delete a schedule (admin only); employees are unassigned
#[utoipa::path(
    delete,
    path = "/schedules/{id}",
    tag = "schedules",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Schedule ID")),
    responses(
        (status = 204, description = "Schedule deactivated")
    )
)]
pub async fn delete_schedule(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;

    state.services.schedules.deactivate(&claims, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
