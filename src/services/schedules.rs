//! Schedules service

use serde_json::json;

use crate::{
    error::{AppError, AppResult},
    models::{
        area::AreaLinkOption,
        schedule::{CreateSchedule, ScheduleDetails, UpdateSchedule},
        user::UserClaims,
    },
    repository::Repository,
    services::notify::{ChangeNotifier, Topic},
};

#[derive(Clone)]
pub struct SchedulesService {
    repository: Repository,
    notifier: ChangeNotifier,
}

impl SchedulesService {
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

    fn days_label(days: &[i16]) -> String {
        days.iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub async fn create(&self, user: &UserClaims, data: &CreateSchedule) -> AppResult<i32> {
        if data.days.is_empty() {
            return Err(AppError::Validation("At least one weekday is required".to_string()));
        }

        let (property_name, area_name) =
            self.repository.schedules.link_labels(data.area_link_id).await?;

        let schedule_id = self.repository.schedules.create(data).await?;

        self.audit(
            user,
            format!(
                "{} created a schedule for {} - {}. Hours {} to {}, tolerance {} min, days: {}.",
                user.sub,
                property_name,
                area_name,
                data.entry_time,
                data.exit_time,
                data.tolerance_minutes.unwrap_or(0),
                Self::days_label(&data.days),
            ),
        )
        .await;

        if let Ok(details) = self.repository.schedules.get_by_id(schedule_id).await {
            self.notifier
                .publish(Topic::Schedules, "schedule-created", json!(details));
        }

        Ok(schedule_id)
    }

    pub async fn list_active(&self) -> AppResult<Vec<ScheduleDetails>> {
        self.repository.schedules.list_active().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<ScheduleDetails> {
        self.repository.schedules.get_by_id(id).await
    }

    pub async fn update(
        &self,
        user: &UserClaims,
        id: i32,
        data: &UpdateSchedule,
    ) -> AppResult<()> {
        if data.days.is_empty() {
            return Err(AppError::Validation("At least one weekday is required".to_string()));
        }

        let (property_name, area_name) =
            self.repository.schedules.link_labels(data.area_link_id).await?;

        self.repository.schedules.update(id, data).await?;

        self.audit(
            user,
            format!(
                "{} updated schedule ID {} in {} - {}. Hours {} to {}, tolerance {} min, days: {}.",
                user.sub,
                id,
                property_name,
                area_name,
                data.entry_time,
                data.exit_time,
                data.tolerance_minutes.unwrap_or(0),
                Self::days_label(&data.days),
            ),
        )
        .await;

        if let Ok(details) = self.repository.schedules.get_by_id(id).await {
            self.notifier
                .publish(Topic::Schedules, "schedule-updated", json!(details));
        }

        Ok(())
    }

    /// Soft-delete a schedule; employees of its area link are unassigned
    pub async fn deactivate(&self, user: &UserClaims, id: i32) -> AppResult<()> {
        self.repository.schedules.deactivate(id).await?;

        self.audit(
            user,
            format!(
                "{} deactivated schedule ID {}. Employees were unassigned from the area.",
                user.sub, id
            ),
        )
        .await;

        self.notifier.publish(
            Topic::Schedules,
            "schedule-deleted",
            json!({ "id": id, "active": false }),
        );

        Ok(())
    }

    pub async fn available_links(
        &self,
        editing_schedule_id: Option<i32>,
    ) -> AppResult<Vec<AreaLinkOption>> {
        self.repository
            .schedules
            .available_links(editing_schedule_id)
            .await
    }
}
