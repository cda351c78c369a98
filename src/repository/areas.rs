//! Areas repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::area::{AreaDetails, CreateArea, UpdateArea},
};

#[derive(Clone)]
pub struct AreasRepository {
    pool: Pool<Postgres>,
}

impl AreasRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Create an area together with its property link
    pub async fn create(&self, data: &CreateArea) -> AppResult<AreaDetails> {
        let mut tx = self.pool.begin().await?;

        let property_name: Option<String> = sqlx::query_scalar(
            "SELECT name FROM properties WHERE id = $1 AND active",
        )
        .bind(data.property_id)
        .fetch_optional(&mut *tx)
        .await?;

        let property_name = property_name
            .ok_or_else(|| AppError::BadRequest("Invalid property".to_string()))?;

        let area_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO areas (name, description, active)
            VALUES ($1, $2, TRUE)
            RETURNING id
            "#,
        )
        .bind(&data.name)
        .bind(&data.description)
        .fetch_one(&mut *tx)
        .await?;

        let area_link_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO property_areas (property_id, area_id, active)
            VALUES ($1, $2, TRUE)
            RETURNING id
            "#,
        )
        .bind(data.property_id)
        .bind(area_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(AreaDetails {
            id: area_id,
            name: data.name.clone(),
            description: data.description.clone(),
            active: true,
            area_link_id,
            property_id: data.property_id,
            property_name,
        })
    }

    /// List active areas with their property labels
    pub async fn list_active(&self) -> AppResult<Vec<AreaDetails>> {
        let rows = sqlx::query_as::<_, AreaDetails>(
            r#"
            SELECT a.id, a.name, a.description, a.active,
                   pa.id AS area_link_id,
                   p.id AS property_id,
                   p.name AS property_name
            FROM areas a
            JOIN property_areas pa ON pa.area_id = a.id AND pa.active
            JOIN properties p ON p.id = pa.property_id AND p.active
            WHERE a.active
            ORDER BY p.name ASC, a.name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get an area with its property link
    pub async fn get_by_id(&self, id: i32) -> AppResult<AreaDetails> {
        sqlx::query_as::<_, AreaDetails>(
            r#"
            SELECT a.id, a.name, a.description, a.active,
                   pa.id AS area_link_id,
                   p.id AS property_id,
                   p.name AS property_name
            FROM areas a
            JOIN property_areas pa ON pa.area_id = a.id
            JOIN properties p ON p.id = pa.property_id
            WHERE a.id = $1
            LIMIT 1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Area {} not found", id)))
    }

    /// Update an area and rebind its property link
    pub async fn update(&self, id: i32, data: &UpdateArea) -> AppResult<AreaDetails> {
        let mut tx = self.pool.begin().await?;

        let exists: Option<i32> = sqlx::query_scalar("SELECT id FROM areas WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(AppError::NotFound(format!("Area {} not found", id)));
        }

        let property_name: Option<String> = sqlx::query_scalar(
            "SELECT name FROM properties WHERE id = $1 AND active",
        )
        .bind(data.property_id)
        .fetch_optional(&mut *tx)
        .await?;
        let property_name = property_name
            .ok_or_else(|| AppError::BadRequest("Invalid property".to_string()))?;

        sqlx::query(
            "UPDATE areas SET name = $1, description = $2 WHERE id = $3",
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE property_areas SET property_id = $1 WHERE area_id = $2",
        )
        .bind(data.property_id)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let area_link_id: i32 = sqlx::query_scalar(
            "SELECT id FROM property_areas WHERE area_id = $1 LIMIT 1",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(AreaDetails {
            id,
            name: data.name.clone(),
            description: data.description.clone(),
            active: true,
            area_link_id,
            property_id: data.property_id,
            property_name,
        })
    }

    /// Soft-delete an area: unassign its employees, deactivate the schedule
    /// binding, the schedule and its days, the link, then the area itself
    pub async fn deactivate(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let link_id: Option<i32> = sqlx::query_scalar(
            "SELECT id FROM property_areas WHERE area_id = $1 AND active",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let link_id = link_id
            .ok_or_else(|| AppError::NotFound(format!("Area {} not found or already inactive", id)))?;

        sqlx::query("UPDATE employees SET area_link_id = NULL WHERE area_link_id = $1")
            .bind(link_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            UPDATE schedules SET active = FALSE
            WHERE id IN (SELECT schedule_id FROM area_schedules WHERE area_link_id = $1)
            "#,
        )
        .bind(link_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE schedule_days SET active = FALSE
            WHERE schedule_id IN (SELECT schedule_id FROM area_schedules WHERE area_link_id = $1)
            "#,
        )
        .bind(link_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE area_schedules SET active = FALSE WHERE area_link_id = $1")
            .bind(link_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE property_areas SET active = FALSE WHERE id = $1")
            .bind(link_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE areas SET active = FALSE WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }
}
