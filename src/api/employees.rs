//! Employee management endpoints

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
        employee::{CreateEmployee, EmployeeDetails, EmployeeQuery, UpdateEmployee},
    },
};

use super::AuthenticatedUser;

/// Create employee response; the generated PIN is returned once
#[derive(Serialize, ToSchema)]
pub struct CreateEmployeeResponse {
    pub id: i32,
    pub pin: String,
}

/// List active employees of a property
#[utoipa::path(
    get,
    path = "/employees",
    tag = "employees",
    security(("bearer_auth" = [])),
    params(EmployeeQuery),
    responses(
        (status = 200, description = "Active employees", body = Vec<EmployeeDetails>)
    )
)]
pub async fn list_employees(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<EmployeeQuery>,
) -> AppResult<Json<Vec<EmployeeDetails>>> {
    let employees = state.services.employees.list(&claims, &query).await?;
    Ok(Json(employees))
}

/// Area links for the employee assignment picker
#[utoipa::path(
    get,
    path = "/employees/area-links",
    tag = "employees",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Assignable area links", body = Vec<AreaLinkOption>)
    )
)]
pub async fn area_links(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<AreaLinkOption>>> {
    let links = state.services.employees.area_link_options(&claims).await?;
    Ok(Json(links))
}

/// Get employee by ID
#[utoipa::path(
    get,
    path = "/employees/{id}",
    tag = "employees",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee details", body = EmployeeDetails),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn get_employee(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<EmployeeDetails>> {
    let employee = state.services.employees.get_by_id(&claims, id).await?;
    Ok(Json(employee))
}

/// Create an employee; the PIN is generated server-side
#[utoipa::path(
    post,
    path = "/employees",
    tag = "employees",
    security(("bearer_auth" = [])),
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = CreateEmployeeResponse),
        (status = 409, description = "Employee number already in use")
    )
)]
pub async fn create_employee(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateEmployee>,
) -> AppResult<(StatusCode, Json<CreateEmployeeResponse>)> {
    claims.require_write()?;

    let (id, pin) = state.services.employees.create(&claims, &data).await?;
    Ok((StatusCode::CREATED, Json(CreateEmployeeResponse { id, pin })))
}

/// Update an employee
#[utoipa::path(
    put,
    path = "/employees/{id}",
    tag = "employees",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Employee ID")),
    request_body = UpdateEmployee,
    responses(
        (status = 200, description = "Employee updated", body = EmployeeDetails),
        (status = 404, description = "Employee not found"),
        (status = 409, description = "Employee number already in use")
    )
)]
pub async fn update_employee(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateEmployee>,
) -> AppResult<Json<EmployeeDetails>> {
    claims.require_write()?;

    let employee = state.services.employees.update(&claims, id, &data).await?;
    Ok(Json(employee))
}

/// Soft-delete an employee and its user account
#[utoipa::path(
    delete,
    path = "/employees/{id}",
    tag = "employees",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Employee ID")),
    responses(
        (status = 204, description = "Employee deactivated")
    )
)]
pub async fn delete_employee(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_write()?;

    state.services.employees.deactivate(&claims, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
