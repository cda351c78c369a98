//! Employee model and request types

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Employee row as stored
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Employee {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub employee_number: Option<String>,
    pub position: Option<String>,
    /// Check-in code presented at the terminal, not a login credential
    pub pin: String,
    pub area_link_id: Option<i32>,
    pub active: bool,
    pub registered_on: NaiveDate,
}

/// Employee joined with its property, area and schedule for listings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EmployeeDetails {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub employee_number: Option<String>,
    pub position: Option<String>,
    pub pin: String,
    pub active: bool,
    pub registered_on: NaiveDate,
    pub area_link_id: Option<i32>,
    pub property_id: Option<i32>,
    pub property_name: Option<String>,
    pub area_id: Option<i32>,
    pub area_name: Option<String>,
    pub entry_time: Option<NaiveTime>,
    pub exit_time: Option<NaiveTime>,
}

/// Create employee request; the PIN is generated server-side
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEmployee {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    pub employee_number: Option<String>,
    #[validate(length(min = 1, message = "Position is required"))]
    pub position: String,
    pub area_link_id: i32,
}

/// Update employee request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEmployee {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    pub employee_number: Option<String>,
    pub position: Option<String>,
    pub area_link_id: i32,
}

/// Employee listing query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct EmployeeQuery {
    /// Admins may list another property; other roles are pinned to their own
    pub property_id: Option<i32>,
}
