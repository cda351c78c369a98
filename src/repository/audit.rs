//! Audit log repository

use sqlx::{Pool, Postgres};

use crate::error::AppResult;

#[derive(Clone)]
pub struct AuditRepository {
    pool: Pool<Postgres>,
}

impl AuditRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Append one audit entry; date and time are filled by the database
    pub async fn record(&self, user_id: i32, action: &str) -> AppResult<()> {
        sqlx::query("INSERT INTO audit_log (user_id, action) VALUES ($1, $2)")
            .bind(user_id)
            .bind(action)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
