//! Attendance repository: PIN lookup, day classification reads, and the
//! transactional write unit for check-in events

use chrono::{NaiveDate, NaiveDateTime};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::attendance::{AttendanceRecord, EmployeeShift, Punctuality, RecordKind},
};

#[derive(Clone)]
pub struct AttendanceRepository {
    pool: Pool<Postgres>,
}

impl AttendanceRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Resolve the unique active employee carrying this PIN, joined through
    /// its area link to the property, area and currently active schedule.
    /// Employees without a reachable schedule do not match.
    pub async fn find_active_employee_by_pin(&self, pin: &str) -> AppResult<Option<EmployeeShift>> {
        let shift = sqlx::query_as::<_, EmployeeShift>(
            r#"
            SELECT e.id AS employee_id,
                   e.first_name || ' ' || e.last_name AS display_name,
                   e.employee_number,
                   e.area_link_id,
                   p.name AS property_name,
                   a.name AS area_name,
                   s.entry_time,
                   s.exit_time,
                   s.tolerance_minutes
            FROM employees e
            JOIN property_areas pa ON pa.id = e.area_link_id AND pa.active
            JOIN properties p ON p.id = pa.property_id
            JOIN areas a ON a.id = pa.area_id
            JOIN area_schedules asg ON asg.area_link_id = pa.id AND asg.active
            JOIN schedules s ON s.id = asg.schedule_id AND s.active
            WHERE e.pin = $1 AND e.active
            LIMIT 1
            "#,
        )
        .bind(pin)
        .fetch_optional(&self.pool)
        .await?;

        Ok(shift)
    }

    /// All attendance records for an employee on a given date, ordered by
    /// time-of-day ascending
    pub async fn records_for_day(
        &self,
        employee_id: i32,
        date: NaiveDate,
    ) -> AppResult<Vec<AttendanceRecord>> {
        let records = sqlx::query_as::<_, AttendanceRecord>(
            r#"
            SELECT id, employee_id, kind, date, time, photo
            FROM attendance
            WHERE employee_id = $1 AND date = $2
            ORDER BY time ASC
            "#,
        )
        .bind(employee_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Persist one check-in event: the optional lateness incidence, the
    /// attendance row and its denormalized history snapshot, all within one
    /// transaction. The unique (employee, date, kind) index turns a
    /// concurrent duplicate into a conflict the caller may retry.
    pub async fn record_event(
        &self,
        shift: &EmployeeShift,
        kind: RecordKind,
        punctuality: Option<Punctuality>,
        now: NaiveDateTime,
    ) -> AppResult<i32> {
        let date = now.date();
        let time = now.time();

        let mut tx = self.pool.begin().await?;

        if punctuality == Some(Punctuality::Late) {
            sqlx::query(
                r#"
                INSERT INTO incidences (employee_id, kind, date, justified)
                VALUES ($1, 'LATE', $2, FALSE)
                "#,
            )
            .bind(shift.employee_id)
            .bind(date)
            .execute(&mut *tx)
            .await?;
        }

        let attendance_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO attendance (employee_id, kind, date, time)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(shift.employee_id)
        .bind(kind)
        .bind(date)
        .bind(time)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db) = &e {
                if db.is_unique_violation() {
                    return AppError::Conflict(
                        "Attendance already recorded for this employee today".to_string(),
                    );
                }
            }
            AppError::Database(e)
        })?;

        sqlx::query(
            r#"
            INSERT INTO attendance_history
                (employee_id, employee_name, employee_number,
                 property_name, area_name, kind, date, time)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(shift.employee_id)
        .bind(&shift.display_name)
        .bind(&shift.employee_number)
        .bind(&shift.property_name)
        .bind(&shift.area_name)
        .bind(kind)
        .bind(date)
        .bind(time)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(attendance_id)
    }

    /// Patch the photo reference on an attendance row and its same-day
    /// history counterpart. Idempotent: re-running with the same reference
    /// rewrites the same value.
    pub async fn attach_photo(&self, attendance_id: i32, photo: &str) -> AppResult<()> {
        let row: Option<(i32, NaiveDate)> = sqlx::query_as(
            "SELECT employee_id, date FROM attendance WHERE id = $1",
        )
        .bind(attendance_id)
        .fetch_optional(&self.pool)
        .await?;

        let (employee_id, date) = row.ok_or_else(|| {
            AppError::NotFound(format!("Attendance record {} not found", attendance_id))
        })?;

        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE attendance SET photo = $1 WHERE id = $2")
            .bind(photo)
            .bind(attendance_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "UPDATE attendance_history SET photo = $1 WHERE employee_id = $2 AND date = $3",
        )
        .bind(photo)
        .bind(employee_id)
        .bind(date)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }
}
