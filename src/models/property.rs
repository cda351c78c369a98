//! Property model and request types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A managed property (site) where areas and employees are assigned
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Property {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub active: bool,
}

/// Create property request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProperty {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
}

/// Update property request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProperty {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
}
