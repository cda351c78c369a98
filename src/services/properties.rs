//! Properties service

use serde_json::json;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        property::{CreateProperty, Property, UpdateProperty},
        user::UserClaims,
    },
    repository::Repository,
    services::notify::{ChangeNotifier, Topic},
};

#[derive(Clone)]
pub struct PropertiesService {
    repository: Repository,
    notifier: ChangeNotifier,
}

impl PropertiesService {
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

    pub async fn create(&self, user: &UserClaims, data: &CreateProperty) -> AppResult<Property> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let property = self.repository.properties.create(data).await?;

        self.audit(
            user,
            format!(
                "{} created property \"{}\" (ID: {})",
                user.sub, property.name, property.id
            ),
        )
        .await;

        self.notifier.publish(
            Topic::Properties,
            "property-created",
            json!(property),
        );

        Ok(property)
    }

    pub async fn list_active(&self) -> AppResult<Vec<Property>> {
        self.repository.properties.list_active().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Property> {
        self.repository.properties.get_by_id(id).await
    }

    pub async fn update(
        &self,
        user: &UserClaims,
        id: i32,
        data: &UpdateProperty,
    ) -> AppResult<Property> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let property = self.repository.properties.update(id, data).await?;

        self.audit(
            user,
            format!(
                "{} updated property \"{}\" (ID: {})",
                user.sub, property.name, id
            ),
        )
        .await;

        self.notifier.publish(
            Topic::Properties,
            "property-updated",
            json!(property),
        );

        Ok(property)
    }

    /// Soft-delete the property row only
    pub async fn deactivate(&self, user: &UserClaims, id: i32) -> AppResult<()> {
        self.repository.properties.deactivate(id).await?;

        self.audit(user, format!("{} deactivated property ID {}", user.sub, id))
            .await;

        self.notifier.publish(
            Topic::Properties,
            "property-deleted",
            json!({ "id": id, "active": false }),
        );

        Ok(())
    }

    /// Soft-delete the property and everything assigned under it
    pub async fn deactivate_cascade(&self, user: &UserClaims, id: i32) -> AppResult<()> {
        self.repository.properties.deactivate_cascade(id).await?;

        self.audit(
            user,
            format!(
                "{} deactivated property ID {} with its areas, schedules and employees",
                user.sub, id
            ),
        )
        .await;

        self.notifier.publish(
            Topic::Properties,
            "property-deleted",
            json!({ "id": id, "active": false }),
        );

        Ok(())
    }
}
