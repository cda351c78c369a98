//! Schedules repository for database operations

use chrono::NaiveTime;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        area::AreaLinkOption,
        schedule::{CreateSchedule, ScheduleDetails, UpdateSchedule},
    },
};

fn parse_time(value: &str, field: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| AppError::Validation(format!("Invalid {} (use HH:MM or HH:MM:SS)", field)))
}

#[derive(Clone)]
pub struct SchedulesRepository {
    pool: Pool<Postgres>,
}

impl SchedulesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Create a schedule with its weekdays and its area-link binding
    pub async fn create(&self, data: &CreateSchedule) -> AppResult<i32> {
        let entry = parse_time(&data.entry_time, "entry_time")?;
        let exit = parse_time(&data.exit_time, "exit_time")?;

        let mut tx = self.pool.begin().await?;

        let schedule_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO schedules (entry_time, exit_time, tolerance_minutes, kind, active)
            VALUES ($1, $2, $3, $4, TRUE)
            RETURNING id
            "#,
        )
        .bind(entry)
        .bind(exit)
        .bind(data.tolerance_minutes.unwrap_or(0))
        .bind(&data.kind)
        .fetch_one(&mut *tx)
        .await?;

        for day in &data.days {
            sqlx::query(
                r#"
                INSERT INTO schedule_days (schedule_id, weekday, active)
                VALUES ($1, $2, TRUE)
                "#,
            )
            .bind(schedule_id)
            .bind(day)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query(
            r#"
            INSERT INTO area_schedules (area_link_id, schedule_id, active)
            VALUES ($1, $2, TRUE)
            "#,
        )
        .bind(data.area_link_id)
        .bind(schedule_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db) = &e {
                if db.is_unique_violation() {
                    return AppError::Conflict(
                        "Area link already has an active schedule".to_string(),
                    );
                }
            }
            AppError::Database(e)
        })?;

        tx.commit().await?;

        Ok(schedule_id)
    }

    /// List active schedules with property/area labels and weekdays
    pub async fn list_active(&self) -> AppResult<Vec<ScheduleDetails>> {
        let mut rows = sqlx::query_as::<_, ScheduleDetails>(
            r#"
            SELECT s.id, s.entry_time, s.exit_time, s.tolerance_minutes,
                   s.kind, s.active,
                   asg.area_link_id,
                   p.name AS property_name,
                   a.name AS area_name
            FROM schedules s
            JOIN area_schedules asg ON asg.schedule_id = s.id AND asg.active
            JOIN property_areas pa ON pa.id = asg.area_link_id AND pa.active
            JOIN properties p ON p.id = pa.property_id AND p.active
            JOIN areas a ON a.id = pa.area_id AND a.active
            WHERE s.active
            ORDER BY p.name ASC, a.name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        for row in &mut rows {
            row.days = self.days_of(row.id).await?;
        }

        Ok(rows)
    }

    /// Get a schedule with its binding and weekdays
    pub async fn get_by_id(&self, id: i32) -> AppResult<ScheduleDetails> {
        let mut row = sqlx::query_as::<_, ScheduleDetails>(
            r#"
            SELECT s.id, s.entry_time, s.exit_time, s.tolerance_minutes,
                   s.kind, s.active,
                   asg.area_link_id,
                   p.name AS property_name,
                   a.name AS area_name
            FROM schedules s
            JOIN area_schedules asg ON asg.schedule_id = s.id
            JOIN property_areas pa ON pa.id = asg.area_link_id
            JOIN properties p ON p.id = pa.property_id
            JOIN areas a ON a.id = pa.area_id
            WHERE s.id = $1
            LIMIT 1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Schedule {} not found", id)))?;

        row.days = self.days_of(id).await?;

        Ok(row)
    }

    async fn days_of(&self, schedule_id: i32) -> AppResult<Vec<i16>> {
        let days: Vec<i16> = sqlx::query_scalar(
            "SELECT weekday FROM schedule_days WHERE schedule_id = $1 AND active ORDER BY weekday",
        )
        .bind(schedule_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(days)
    }

    /// Update a schedule, rebind its area link and replace its weekdays
    pub async fn update(&self, id: i32, data: &UpdateSchedule) -> AppResult<()> {
        let entry = parse_time(&data.entry_time, "entry_time")?;
        let exit = parse_time(&data.exit_time, "exit_time")?;

        let mut tx = self.pool.begin().await?;

        let exists: Option<i32> = sqlx::query_scalar("SELECT id FROM schedules WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(AppError::NotFound(format!("Schedule {} not found", id)));
        }

        sqlx::query(
            r#"
            UPDATE schedules
            SET entry_time = $1, exit_time = $2, tolerance_minutes = $3, kind = $4
            WHERE id = $5
            "#,
        )
        .bind(entry)
        .bind(exit)
        .bind(data.tolerance_minutes.unwrap_or(0))
        .bind(&data.kind)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE area_schedules SET area_link_id = $1 WHERE schedule_id = $2")
            .bind(data.area_link_id)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db) = &e {
                    if db.is_unique_violation() {
                        return AppError::Conflict(
                            "Area link already has an active schedule".to_string(),
                        );
                    }
                }
                AppError::Database(e)
            })?;

        sqlx::query("DELETE FROM schedule_days WHERE schedule_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        for day in &data.days {
            sqlx::query(
                "INSERT INTO schedule_days (schedule_id, weekday, active) VALUES ($1, $2, TRUE)",
            )
            .bind(id)
            .bind(day)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    /// Soft-delete a schedule: unassign employees from its area link,
    /// deactivate the binding, the schedule and its days
    pub async fn deactivate(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let exists: Option<i32> = sqlx::query_scalar("SELECT id FROM schedules WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(AppError::NotFound(format!("Schedule {} not found", id)));
        }

        let link_id: Option<i32> = sqlx::query_scalar(
            "SELECT area_link_id FROM area_schedules WHERE schedule_id = $1 AND active",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let link_id = link_id
            .ok_or_else(|| AppError::BadRequest("Schedule is already inactive".to_string()))?;

        sqlx::query("UPDATE employees SET area_link_id = NULL WHERE area_link_id = $1")
            .bind(link_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE area_schedules SET active = FALSE WHERE schedule_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE schedules SET active = FALSE WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE schedule_days SET active = FALSE WHERE schedule_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    /// Area links with no active schedule; when editing, the link currently
    /// held by that schedule is included so the picker can keep it selected
    pub async fn available_links(
        &self,
        editing_schedule_id: Option<i32>,
    ) -> AppResult<Vec<AreaLinkOption>> {
        let rows = match editing_schedule_id {
            None => {
                sqlx::query_as::<_, AreaLinkOption>(
                    r#"
                    SELECT pa.id AS area_link_id,
                           a.name AS area_name,
                           p.name AS property_name
                    FROM property_areas pa
                    JOIN areas a ON a.id = pa.area_id AND a.active
                    JOIN properties p ON p.id = pa.property_id AND p.active
                    LEFT JOIN area_schedules asg
                        ON asg.area_link_id = pa.id AND asg.active
                    WHERE pa.active AND asg.id IS NULL
                    ORDER BY p.name, a.name
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
            Some(schedule_id) => {
                sqlx::query_as::<_, AreaLinkOption>(
                    r#"
                    SELECT pa.id AS area_link_id,
                           a.name AS area_name,
                           p.name AS property_name
                    FROM property_areas pa
                    JOIN areas a ON a.id = pa.area_id AND a.active
                    JOIN properties p ON p.id = pa.property_id AND p.active
                    LEFT JOIN area_schedules asg
                        ON asg.area_link_id = pa.id AND asg.active
                    WHERE pa.active AND (asg.id IS NULL OR asg.schedule_id = $1)
                    ORDER BY p.name, a.name
                    "#,
                )
                .bind(schedule_id)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows)
    }

    /// Property and area labels for an area link, used in audit entries
    pub async fn link_labels(&self, area_link_id: i32) -> AppResult<(String, String)> {
        let row: Option<(String, String)> = sqlx::query_as(
            r#"
            SELECT p.name, a.name
            FROM property_areas pa
            JOIN properties p ON p.id = pa.property_id
            JOIN areas a ON a.id = pa.area_id
            WHERE pa.id = $1
            "#,
        )
        .bind(area_link_id)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| AppError::BadRequest("Invalid area link".to_string()))
    }
}
