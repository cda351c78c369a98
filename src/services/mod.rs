//! Business logic services

pub mod areas;
pub mod auth;
pub mod clock;
pub mod employees;
pub mod notify;
pub mod properties;
pub mod schedules;
pub mod storage;

use crate::{
    config::{AuthConfig, StorageConfig},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub properties: properties::PropertiesService,
    pub areas: areas::AreasService,
    pub schedules: schedules::SchedulesService,
    pub employees: employees::EmployeesService,
    pub clock: clock::ClockService,
    pub notifier: notify::ChangeNotifier,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository. The change notifier
    /// is built here and injected everywhere it is needed; nothing reaches
    /// for it as ambient global state.
    pub fn new(
        repository: Repository,
        auth_config: AuthConfig,
        storage_config: &StorageConfig,
    ) -> Self {
        let notifier = notify::ChangeNotifier::default();
        let storage = storage::StorageService::new(storage_config);

        Self {
            auth: auth::AuthService::new(repository.clone(), auth_config),
            properties: properties::PropertiesService::new(repository.clone(), notifier.clone()),
            areas: areas::AreasService::new(repository.clone(), notifier.clone()),
            schedules: schedules::SchedulesService::new(repository.clone(), notifier.clone()),
            employees: employees::EmployeesService::new(repository.clone(), notifier.clone()),
            clock: clock::ClockService::new(repository.clone(), notifier.clone(), storage),
            notifier,
            repository,
        }
    }

    /// Readiness probe: one round trip to the database
    pub async fn database_ready(&self) -> crate::error::AppResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.repository.pool)
            .await?;
        Ok(())
    }
}
