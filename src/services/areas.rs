//! Areas service

use serde_json::json;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        area::{AreaDetails, CreateArea, UpdateArea},
        user::UserClaims,
    },
    repository::Repository,
    services::notify::{ChangeNotifier, Topic},
};

#[derive(Clone)]
pub struct AreasService {
    repository: Repository,
    notifier: ChangeNotifier,
}

impl AreasService {
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

    pub async fn create(&self, user: &UserClaims, data: &CreateArea) -> AppResult<AreaDetails> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let area = self.repository.areas.create(data).await?;

        self.audit(
            user,
            format!(
                "{} created area \"{}\" in property \"{}\"",
                user.sub, area.name, area.property_name
            ),
        )
        .await;

        self.notifier
            .publish(Topic::Areas, "area-created", json!(area));

        Ok(area)
    }

    pub async fn list_active(&self) -> AppResult<Vec<AreaDetails>> {
        self.repository.areas.list_active().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<AreaDetails> {
        self.repository.areas.get_by_id(id).await
    }

    pub async fn update(
        &self,
        user: &UserClaims,
        id: i32,
        data: &UpdateArea,
    ) -> AppResult<AreaDetails> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let area = self.repository.areas.update(id, data).await?;

        self.audit(
            user,
            format!(
                "{} updated area \"{}\" (ID: {}) in property \"{}\"",
                user.sub, area.name, id, area.property_name
            ),
        )
        .await;

        self.notifier
            .publish(Topic::Areas, "area-updated", json!(area));

        Ok(area)
    }

    /// Soft-delete an area; its employees are left unassigned
    pub async fn deactivate(&self, user: &UserClaims, id: i32) -> AppResult<()> {
        self.repository.areas.deactivate(id).await?;

        self.audit(
            user,
            format!(
                "{} deactivated area ID {}. Employees were unassigned.",
                user.sub, id
            ),
        )
        .await;

        self.notifier.publish(
            Topic::Areas,
            "area-deleted",
            json!({ "id": id, "active": false }),
        );

        Ok(())
    }
}
