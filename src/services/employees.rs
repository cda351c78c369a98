//! Employees service

use rand::Rng;
use serde_json::json;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        area::AreaLinkOption,
        employee::{CreateEmployee, EmployeeDetails, EmployeeQuery, UpdateEmployee},
        user::UserClaims,
    },
    repository::Repository,
    services::notify::{ChangeNotifier, Topic},
};

#[derive(Clone)]
pub struct EmployeesService {
    repository: Repository,
    notifier: ChangeNotifier,
}

impl EmployeesService {
    pub fn new(repository: Repository, notifier: ChangeNotifier) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    async fn audit(&self, user: &UserClaims, action: String) {
        if let Err(e) = self.repository.audit.record(user.user_id, &action).await {
            tracing::warn!("Failed to write audit entry: {}", e);
        }
    }

    /// Generate a PIN of the form `<property_id><4 random digits>`, retrying
    /// until it is unique across all employees
    async fn generate_unique_pin(&self, property_id: i32) -> AppResult<String> {
        loop {
            let suffix: u32 = rand::thread_rng().gen_range(1000..10000);
            let pin = format!("{}{}", property_id, suffix);
            if !self.repository.employees.pin_exists(&pin).await? {
                return Ok(pin);
            }
        }
    }

    /// Create an employee; returns the new id and the generated PIN
    pub async fn create(
        &self,
        user: &UserClaims,
        data: &CreateEmployee,
    ) -> AppResult<(i32, String)> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let (property_id, _property_name, _area_name) = self
            .repository
            .employees
            .resolve_area_link(data.area_link_id)
            .await?
            .ok_or_else(|| AppError::BadRequest("Invalid area link".to_string()))?;

        user.require_property(property_id)?;

        let pin = self.generate_unique_pin(property_id).await?;
        let id = self.repository.employees.create(data, &pin).await?;

        self.audit(
            user,
            format!(
                "{} created employee {} {}",
                user.sub, data.first_name, data.last_name
            ),
        )
        .await;

        if let Ok(details) = self.repository.employees.details(id).await {
            self.notifier
                .publish(Topic::Employees, "employee-created", json!(details));
        }

        Ok((id, pin))
    }

    /// Active employees, always scoped to one property. Admins may pick the
    /// property; other roles are pinned to their own.
    pub async fn list(
        &self,
        user: &UserClaims,
        query: &EmployeeQuery,
    ) -> AppResult<Vec<EmployeeDetails>> {
        let property_id = if user.is_admin() {
            query.property_id.or(user.property_id)
        } else {
            user.property_id
        };

        let property_id = property_id.ok_or_else(|| {
            AppError::BadRequest("No property scope for this account; pass property_id".to_string())
        })?;

        self.repository.employees.list_active(property_id).await
    }

    pub async fn get_by_id(&self, user: &UserClaims, id: i32) -> AppResult<EmployeeDetails> {
        let details = self.repository.employees.details(id).await?;

        // Property-scoped roles only see their own employees
        if !user.is_admin() && details.property_id != user.property_id {
            return Err(AppError::NotFound(format!("Employee {} not found", id)));
        }

        Ok(details)
    }

    pub async fn update(
        &self,
        user: &UserClaims,
        id: i32,
        data: &UpdateEmployee,
    ) -> AppResult<EmployeeDetails> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let current_property = self
            .repository
            .employees
            .property_of(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Employee {} not found", id)))?;

        match current_property {
            Some(pid) => user.require_property(pid)?,
            // unassigned employees can only be touched by an admin
            None => user.require_admin()?,
        }

        let (destination_property, _, _) = self
            .repository
            .employees
            .resolve_area_link(data.area_link_id)
            .await?
            .ok_or_else(|| AppError::BadRequest("Invalid area link".to_string()))?;

        user.require_property(destination_property)?;

        self.repository.employees.update(id, data).await?;

        self.audit(
            user,
            format!(
                "{} updated employee {} {}",
                user.sub, data.first_name, data.last_name
            ),
        )
        .await;

        let details = self.repository.employees.details(id).await?;
        self.notifier
            .publish(Topic::Employees, "employee-updated", json!(details));

        Ok(details)
    }

    /// Soft-delete an employee and its user account
    pub async fn deactivate(&self, user: &UserClaims, id: i32) -> AppResult<()> {
        let details = self.repository.employees.details(id).await?;

        match details.property_id {
            Some(pid) => user.require_property(pid)?,
            None => user.require_admin()?,
        }

        self.repository.employees.deactivate(id).await?;

        self.audit(
            user,
            format!(
                "{} deactivated employee: {} {} (ID: {})",
                user.sub, details.first_name, details.last_name, id
            ),
        )
        .await;

        self.notifier.publish(
            Topic::Employees,
            "employee-deleted",
            json!({ "id": id, "active": false }),
        );

        Ok(())
    }

    /// Area links offered in the assignment picker; property admins only
    /// see links of their own property
    pub async fn area_link_options(&self, user: &UserClaims) -> AppResult<Vec<AreaLinkOption>> {
        let scope = if user.is_admin() {
            None
        } else {
            user.property_id
        };
        self.repository.employees.area_link_options(scope).await
    }
}
