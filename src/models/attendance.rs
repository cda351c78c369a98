//! Attendance models: records, event kinds, punctuality verdicts

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;

/// Kind of an attendance event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordKind {
    Entry,
    Exit,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Entry => "ENTRY",
            RecordKind::Exit => "EXIT",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ENTRY" => Ok(RecordKind::Entry),
            "EXIT" => Ok(RecordKind::Exit),
            _ => Err(format!("Invalid record kind: {}", s)),
        }
    }
}

// SQLx conversion for RecordKind (stored as TEXT)
impl sqlx::Type<Postgres> for RecordKind {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for RecordKind {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for RecordKind {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// Punctuality verdict for an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Punctuality {
    OnTime,
    Late,
}

impl Punctuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Punctuality::OnTime => "ON_TIME",
            Punctuality::Late => "LATE",
        }
    }
}

impl std::fmt::Display for Punctuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Attendance record as stored
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AttendanceRecord {
    pub id: i32,
    pub employee_id: i32,
    pub kind: RecordKind,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub photo: Option<String>,
}

/// Lateness incidence derived from a late entry, justifiable later
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Incidence {
    pub id: i32,
    pub employee_id: i32,
    pub kind: String,
    pub date: NaiveDate,
    pub justified: bool,
}

/// Employee resolved by PIN together with its active schedule, as consumed
/// by the check-in decision procedure
#[derive(Debug, Clone, FromRow)]
pub struct EmployeeShift {
    pub employee_id: i32,
    pub display_name: String,
    pub employee_number: Option<String>,
    pub area_link_id: i32,
    pub property_name: String,
    pub area_name: String,
    pub entry_time: NaiveTime,
    pub exit_time: NaiveTime,
    pub tolerance_minutes: i32,
}

/// Successful check-in outcome returned to the terminal
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CheckInResult {
    pub attendance_id: i32,
    pub display_name: String,
    pub kind: RecordKind,
    /// Present for entries only; exits carry no punctuality verdict
    pub punctuality: Option<Punctuality>,
}
