//! Area models (areas and their property links)

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// An organizational area, always reached through its property link
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Area {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub active: bool,
}

/// Area joined with the property it is linked to
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AreaDetails {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub active: bool,
    /// Join-entity id binding this area to its property
    pub area_link_id: i32,
    pub property_id: i32,
    pub property_name: String,
}

/// Create area request; the link to a property is created in the same call
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateArea {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub description: Option<String>,
    pub property_id: i32,
}

/// Update area request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateArea {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub description: Option<String>,
    pub property_id: i32,
}

/// An area-within-property link offered for assignment pickers
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AreaLinkOption {
    pub area_link_id: i32,
    pub area_name: String,
    pub property_name: String,
}
