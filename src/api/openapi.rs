//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{areas, auth, clock, employees, health, properties, schedules, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tempus API",
        version = "1.0.0",
        description = "Workforce Time and Attendance REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::logout,
        auth::me,
        // Users
        users::create_user,
        // Clock
        clock::server_time,
        clock::check_in,
        clock::attach_photo,
        // Properties
        properties::list_properties,
        properties::get_property,
        properties::create_property,
        properties::update_property,
        properties::delete_property,
        properties::delete_property_cascade,
        // Areas
        areas::list_areas,
        areas::get_area,
        areas::create_area,
        areas::update_area,
        areas::delete_area,
        // Schedules
        schedules::list_schedules,
        schedules::available_links,
        schedules::get_schedule,
        schedules::create_schedule,
        schedules::update_schedule,
        schedules::delete_schedule,
        // Employees
        employees::list_employees,
        employees::area_links,
        employees::get_employee,
        employees::create_employee,
        employees::update_employee,
        employees::delete_employee,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::LogoutResponse,
            auth::UserInfo,
            // Users
            crate::models::user::CreateUser,
            crate::models::user::Role,
            users::CreateUserResponse,
            // Clock
            clock::ServerTimeResponse,
            clock::CheckInRequest,
            clock::AttachPhotoRequest,
            clock::AttachPhotoResponse,
            crate::models::attendance::CheckInResult,
            crate::models::attendance::RecordKind,
            crate::models::attendance::Punctuality,
            crate::models::attendance::AttendanceRecord,
            crate::models::attendance::Incidence,
            // Properties
            crate::models::property::Property,
            crate::models::property::CreateProperty,
            crate::models::property::UpdateProperty,
            // Areas
            crate::models::area::Area,
            crate::models::area::AreaDetails,
            crate::models::area::CreateArea,
            crate::models::area::UpdateArea,
            crate::models::area::AreaLinkOption,
            // Schedules
            crate::models::schedule::Schedule,
            crate::models::schedule::ScheduleDetails,
            crate::models::schedule::CreateSchedule,
            crate::models::schedule::UpdateSchedule,
            schedules::CreateScheduleResponse,
            // Employees
            crate::models::employee::Employee,
            crate::models::employee::EmployeeDetails,
            crate::models::employee::CreateEmployee,
            crate::models::employee::UpdateEmployee,
            employees::CreateEmployeeResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "users", description = "User account management"),
        (name = "clock", description = "Terminal check-in endpoints"),
        (name = "properties", description = "Property management"),
        (name = "areas", description = "Area management"),
        (name = "schedules", description = "Schedule management"),
        (name = "employees", description = "Employee management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
