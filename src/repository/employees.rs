//! Employees repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        area::AreaLinkOption,
        employee::{CreateEmployee, EmployeeDetails, UpdateEmployee},
    },
};

const DETAILS_SELECT: &str = r#"
    SELECT e.id, e.first_name, e.last_name, e.employee_number, e.position,
           e.pin, e.active, e.registered_on,
           pa.id AS area_link_id,
           p.id AS property_id,
           p.name AS property_name,
           a.id AS area_id,
           a.name AS area_name,
           s.entry_time,
           s.exit_time
    FROM employees e
    LEFT JOIN property_areas pa ON pa.id = e.area_link_id
    LEFT JOIN properties p ON p.id = pa.property_id
    LEFT JOIN areas a ON a.id = pa.area_id
    LEFT JOIN area_schedules asg ON asg.area_link_id = pa.id AND asg.active
    LEFT JOIN schedules s ON s.id = asg.schedule_id AND s.active
"#;

#[derive(Clone)]
pub struct EmployeesRepository {
    pool: Pool<Postgres>,
}

impl EmployeesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Whether any employee (active or not) already carries this PIN
    pub async fn pin_exists(&self, pin: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM employees WHERE pin = $1)",
        )
        .bind(pin)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Resolve an active area link to its property id and labels
    pub async fn resolve_area_link(
        &self,
        area_link_id: i32,
    ) -> AppResult<Option<(i32, String, String)>> {
        let row: Option<(i32, String, String)> = sqlx::query_as(
            r#"
            SELECT pa.property_id, p.name, a.name
            FROM property_areas pa
            JOIN properties p ON p.id = pa.property_id AND p.active
            JOIN areas a ON a.id = pa.area_id AND a.active
            WHERE pa.id = $1 AND pa.active
            "#,
        )
        .bind(area_link_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Insert an employee with a server-generated PIN
    pub async fn create(&self, data: &CreateEmployee, pin: &str) -> AppResult<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO employees
                (first_name, last_name, employee_number, position, pin,
                 area_link_id, active, registered_on)
            VALUES ($1, $2, $3, $4, $5, $6, TRUE, CURRENT_DATE)
            RETURNING id
            "#,
        )
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.employee_number)
        .bind(&data.position)
        .bind(pin)
        .bind(data.area_link_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db) = &e {
                if db.is_unique_violation() {
                    return AppError::Conflict("Employee number already in use".to_string());
                }
            }
            AppError::Database(e)
        })?;

        Ok(id)
    }

    /// Employee with its property, area and schedule labels
    pub async fn details(&self, id: i32) -> AppResult<EmployeeDetails> {
        let query = format!("{} WHERE e.id = $1 LIMIT 1", DETAILS_SELECT);
        sqlx::query_as::<_, EmployeeDetails>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Employee {} not found", id)))
    }

    /// Active employees of one property, ordered by first name
    pub async fn list_active(&self, property_id: i32) -> AppResult<Vec<EmployeeDetails>> {
        let query = format!(
            "{} WHERE e.active AND p.id = $1 ORDER BY e.first_name ASC",
            DETAILS_SELECT
        );
        let rows = sqlx::query_as::<_, EmployeeDetails>(&query)
            .bind(property_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Active area links for the assignment picker, optionally limited to
    /// one property
    pub async fn area_link_options(
        &self,
        property_id: Option<i32>,
    ) -> AppResult<Vec<AreaLinkOption>> {
        let rows = match property_id {
            None => {
                sqlx::query_as::<_, AreaLinkOption>(
                    r#"
                    SELECT pa.id AS area_link_id,
                           a.name AS area_name,
                           p.name AS property_name
                    FROM property_areas pa
                    JOIN areas a ON a.id = pa.area_id AND a.active
                    JOIN properties p ON p.id = pa.property_id AND p.active
                    WHERE pa.active
                    ORDER BY p.name ASC, a.name ASC
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
            Some(pid) => {
                sqlx::query_as::<_, AreaLinkOption>(
                    r#"
                    SELECT pa.id AS area_link_id,
                           a.name AS area_name,
                           p.name AS property_name
                    FROM property_areas pa
                    JOIN areas a ON a.id = pa.area_id AND a.active
                    JOIN properties p ON p.id = pa.property_id AND p.active
                    WHERE pa.active AND p.id = $1
                    ORDER BY p.name ASC, a.name ASC
                    "#,
                )
                .bind(pid)
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(rows)
    }

    /// Property an employee belongs to, if any. Outer None: no such
    /// employee; inner None: unassigned.
    pub async fn property_of(&self, id: i32) -> AppResult<Option<Option<i32>>> {
        let row: Option<(Option<i32>,)> = sqlx::query_as(
            r#"
            SELECT p.id
            FROM employees e
            LEFT JOIN property_areas pa ON pa.id = e.area_link_id
            LEFT JOIN properties p ON p.id = pa.property_id
            WHERE e.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|(pid,)| pid))
    }

    /// Update an employee's identity and assignment
    pub async fn update(&self, id: i32, data: &UpdateEmployee) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE employees
            SET first_name = $1,
                last_name = $2,
                employee_number = $3,
                position = $4,
                area_link_id = $5
            WHERE id = $6
            "#,
        )
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.employee_number)
        .bind(&data.position)
        .bind(data.area_link_id)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db) = &e {
                if db.is_unique_violation() {
                    return AppError::Conflict("Employee number already in use".to_string());
                }
            }
            AppError::Database(e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Employee {} not found", id)));
        }
        Ok(())
    }

    /// Soft-delete an employee and any user account tied to it
    pub async fn deactivate(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("UPDATE employees SET active = FALSE WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Employee {} not found", id)));
        }

        sqlx::query("UPDATE users SET active = FALSE WHERE employee_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }
}
