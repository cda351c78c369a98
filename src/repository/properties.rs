//! Properties repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::property::{CreateProperty, Property, UpdateProperty},
};

#[derive(Clone)]
pub struct PropertiesRepository {
    pool: Pool<Postgres>,
}

impl PropertiesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get property by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Property> {
        sqlx::query_as::<_, Property>("SELECT * FROM properties WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Property {} not found", id)))
    }

    /// List all active properties
    pub async fn list_active(&self) -> AppResult<Vec<Property>> {
        let rows = sqlx::query_as::<_, Property>(
            "SELECT * FROM properties WHERE active ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Create a property
    pub async fn create(&self, data: &CreateProperty) -> AppResult<Property> {
        let row = sqlx::query_as::<_, Property>(
            r#"
            INSERT INTO properties (name, address, active)
            VALUES ($1, $2, TRUE)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.address)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update a property
    pub async fn update(&self, id: i32, data: &UpdateProperty) -> AppResult<Property> {
        sqlx::query_as::<_, Property>(
            r#"
            UPDATE properties
            SET name = $1, address = $2
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.address)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Property {} not found", id)))
    }

    /// Soft-delete the property row only; areas, schedules and employees
    /// keep their current state
    pub async fn deactivate(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("UPDATE properties SET active = FALSE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Property {} not found", id)));
        }
        Ok(())
    }

    /// Soft-delete the property and everything hanging off it: area links,
    /// areas, schedules with their days, employees and their user accounts
    pub async fn deactivate_cascade(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("UPDATE properties SET active = FALSE WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Property {} not found", id)));
        }

        sqlx::query(
            r#"
            UPDATE users SET active = FALSE
            WHERE employee_id IN (
                SELECT e.id FROM employees e
                JOIN property_areas pa ON pa.id = e.area_link_id
                WHERE pa.property_id = $1
            )
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE employees SET active = FALSE
            WHERE area_link_id IN (SELECT id FROM property_areas WHERE property_id = $1)
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE schedules SET active = FALSE
            WHERE id IN (
                SELECT asg.schedule_id FROM area_schedules asg
                JOIN property_areas pa ON pa.id = asg.area_link_id
                WHERE pa.property_id = $1
            )
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE schedule_days SET active = FALSE
            WHERE schedule_id IN (
                SELECT asg.schedule_id FROM area_schedules asg
                JOIN property_areas pa ON pa.id = asg.area_link_id
                WHERE pa.property_id = $1
            )
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE area_schedules SET active = FALSE
            WHERE area_link_id IN (SELECT id FROM property_areas WHERE property_id = $1)
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE areas SET active = FALSE
            WHERE id IN (SELECT area_id FROM property_areas WHERE property_id = $1)
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE property_areas SET active = FALSE WHERE property_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }
}
