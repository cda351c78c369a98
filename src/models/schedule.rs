//! Schedule models

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

/// A work schedule attached to an area-within-property link
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Schedule {
    pub id: i32,
    /// Expected entry time-of-day
    pub entry_time: NaiveTime,
    /// Expected exit time-of-day
    pub exit_time: NaiveTime,
    /// Grace period after entry_time during which an entry is still on time
    pub tolerance_minutes: i32,
    /// Free-form schedule kind label (e.g. "morning")
    pub kind: Option<String>,
    pub active: bool,
}

/// Schedule joined with its area link, property and area labels
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ScheduleDetails {
    pub id: i32,
    pub entry_time: NaiveTime,
    pub exit_time: NaiveTime,
    pub tolerance_minutes: i32,
    pub kind: Option<String>,
    pub active: bool,
    pub area_link_id: i32,
    pub property_name: String,
    pub area_name: String,
    /// Applicable weekdays (0=Monday, 6=Sunday), loaded separately
    #[sqlx(skip)]
    pub days: Vec<i16>,
}

/// Create schedule request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSchedule {
    /// Entry time (HH:MM or HH:MM:SS)
    pub entry_time: String,
    /// Exit time (HH:MM or HH:MM:SS)
    pub exit_time: String,
    pub tolerance_minutes: Option<i32>,
    pub kind: Option<String>,
    /// Area link the schedule is attached to
    pub area_link_id: i32,
    /// Applicable weekdays (0=Monday, 6=Sunday)
    pub days: Vec<i16>,
}

/// Update schedule request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateSchedule {
    pub entry_time: String,
    pub exit_time: String,
    pub tolerance_minutes: Option<i32>,
    pub kind: Option<String>,
    pub area_link_id: i32,
    pub days: Vec<i16>,
}

/// Query parameters for the available-links picker
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct AvailableLinksQuery {
    /// When editing, include the link currently held by this schedule
    pub editing_schedule_id: Option<i32>,
}
