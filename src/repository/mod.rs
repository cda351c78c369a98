//! Repository layer for database operations

pub mod areas;
pub mod attendance;
pub mod audit;
pub mod employees;
pub mod properties;
pub mod schedules;
pub mod users;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub properties: properties::PropertiesRepository,
    pub areas: areas::AreasRepository,
    pub schedules: schedules::SchedulesRepository,
    pub employees: employees::EmployeesRepository,
    pub attendance: attendance::AttendanceRepository,
    pub users: users::UsersRepository,
    pub audit: audit::AuditRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            properties: properties::PropertiesRepository::new(pool.clone()),
            areas: areas::AreasRepository::new(pool.clone()),
            schedules: schedules::SchedulesRepository::new(pool.clone()),
            employees: employees::EmployeesRepository::new(pool.clone()),
            attendance: attendance::AttendanceRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            audit: audit::AuditRepository::new(pool.clone()),
            pool,
        }
    }
}
