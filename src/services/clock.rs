//! Attendance decision engine
//!
//! Resolves a terminal PIN to an employee, classifies the event as an entry
//! or an exit for the current date, evaluates punctuality against the
//! schedule tolerance, and hands the resulting rows to the repository as
//! one transactional unit. The caller supplies `now`, so classification and
//! punctuality are pure over explicit instants.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde_json::json;

use crate::{
    error::{AppError, AppResult},
    models::attendance::{AttendanceRecord, CheckInResult, Punctuality, RecordKind},
    repository::Repository,
    services::{
        notify::{ChangeNotifier, Topic},
        storage::StorageService,
    },
};

#[derive(Clone)]
pub struct ClockService {
    repository: Repository,
    notifier: ChangeNotifier,
    storage: StorageService,
}

impl ClockService {
    pub fn new(repository: Repository, notifier: ChangeNotifier, storage: StorageService) -> Self {
        Self {
            repository,
            notifier,
            storage,
        }
    }

    /// Process one terminal check-in.
    ///
    /// Rejections (unknown PIN, already exited, day complete, past the exit
    /// window) leave no trace; a successful event writes the attendance
    /// row, its history snapshot and, for a late entry, the incidence, all
    /// inside one transaction. A concurrent duplicate surfaces as a
    /// conflict that is safe to retry from the top.
    pub async fn check_in(&self, pin: &str, now: NaiveDateTime) -> AppResult<CheckInResult> {
        let shift = self
            .repository
            .attendance
            .find_active_employee_by_pin(pin)
            .await?
            .ok_or(AppError::PinNotFound)?;

        let records = self
            .repository
            .attendance
            .records_for_day(shift.employee_id, now.date())
            .await?;

        let kind = classify_day(&records)?;

        let punctuality = match kind {
            RecordKind::Entry => {
                if !entry_window_open(shift.exit_time, now) {
                    return Err(AppError::PastExitWindow);
                }
                Some(evaluate_punctuality(
                    shift.entry_time,
                    shift.tolerance_minutes,
                    now,
                ))
            }
            RecordKind::Exit => None,
        };

        let attendance_id = self
            .repository
            .attendance
            .record_event(&shift, kind, punctuality, now)
            .await?;

        if punctuality == Some(Punctuality::Late) {
            tracing::info!(
                employee_id = shift.employee_id,
                "late entry recorded, incidence created"
            );
        }

        // Best-effort dashboard notification; never affects the outcome
        self.notifier.publish(
            Topic::Attendance,
            "attendance-recorded",
            json!({
                "attendance_id": attendance_id,
                "employee_id": shift.employee_id,
                "display_name": shift.display_name,
                "property_name": shift.property_name,
                "area_name": shift.area_name,
                "kind": kind,
                "punctuality": punctuality,
                "date": now.date(),
                "time": now.time().format("%H:%M:%S").to_string(),
            }),
        );

        Ok(CheckInResult {
            attendance_id,
            display_name: shift.display_name,
            kind,
            punctuality,
        })
    }

    /// Store an attendance photo and patch the reference onto the live row
    /// and its history counterpart. Idempotent under retry.
    pub async fn attach_photo(
        &self,
        attendance_id: i32,
        file_name: &str,
        image_base64: &str,
    ) -> AppResult<String> {
        let path = self
            .storage
            .store_photo(attendance_id, file_name, image_base64)
            .await?;

        self.repository
            .attendance
            .attach_photo(attendance_id, &path)
            .await?;

        Ok(path)
    }
}

/// Classify what today's event would be from the records already on file.
/// A day is structurally capped at one entry followed by one exit.
fn classify_day(records: &[AttendanceRecord]) -> AppResult<RecordKind> {
    match records {
        [] => Ok(RecordKind::Entry),
        [only] if only.kind == RecordKind::Entry => Ok(RecordKind::Exit),
        [_] => Err(AppError::AlreadyExited),
        _ => Err(AppError::DayComplete),
    }
}

/// An entry may be recorded strictly before the scheduled exit time; at the
/// cutoff instant itself it is refused
fn entry_window_open(exit_time: NaiveTime, now: NaiveDateTime) -> bool {
    now < now.date().and_time(exit_time)
}

/// On time up to and including entry time plus tolerance
fn evaluate_punctuality(
    entry_time: NaiveTime,
    tolerance_minutes: i32,
    now: NaiveDateTime,
) -> Punctuality {
    let deadline = now.date().and_time(entry_time) + Duration::minutes(tolerance_minutes as i64);
    if now <= deadline {
        Punctuality::OnTime
    } else {
        Punctuality::Late
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn instant(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 3)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn time(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    fn record(id: i32, kind: RecordKind, h: u32, m: u32) -> AttendanceRecord {
        AttendanceRecord {
            id,
            employee_id: 7,
            kind,
            date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
            time: time(h, m, 0),
            photo: None,
        }
    }

    #[test]
    fn no_records_classifies_as_entry() {
        assert_eq!(classify_day(&[]).unwrap(), RecordKind::Entry);
    }

    #[test]
    fn single_entry_classifies_as_exit() {
        let records = [record(1, RecordKind::Entry, 9, 2)];
        assert_eq!(classify_day(&records).unwrap(), RecordKind::Exit);
    }

    #[test]
    fn single_exit_is_rejected() {
        let records = [record(1, RecordKind::Exit, 18, 1)];
        assert!(matches!(
            classify_day(&records),
            Err(AppError::AlreadyExited)
        ));
    }

    #[test]
    fn completed_day_is_rejected() {
        let records = [
            record(1, RecordKind::Entry, 9, 2),
            record(2, RecordKind::Exit, 18, 1),
        ];
        assert!(matches!(classify_day(&records), Err(AppError::DayComplete)));
    }

    #[test]
    fn three_records_still_reject_as_day_complete() {
        let records = [
            record(1, RecordKind::Entry, 9, 0),
            record(2, RecordKind::Exit, 13, 0),
            record(3, RecordKind::Entry, 14, 0),
        ];
        assert!(matches!(classify_day(&records), Err(AppError::DayComplete)));
    }

    #[test]
    fn punctuality_deadline_is_inclusive() {
        // entry 09:00, tolerance 15 -> 09:15:00 is still on time
        let entry = time(9, 0, 0);
        assert_eq!(
            evaluate_punctuality(entry, 15, instant(9, 15, 0)),
            Punctuality::OnTime
        );
        assert_eq!(
            evaluate_punctuality(entry, 15, instant(9, 15, 1)),
            Punctuality::Late
        );
    }

    #[test]
    fn zero_tolerance_late_one_second_after_entry_time() {
        let entry = time(9, 0, 0);
        assert_eq!(
            evaluate_punctuality(entry, 0, instant(9, 0, 0)),
            Punctuality::OnTime
        );
        assert_eq!(
            evaluate_punctuality(entry, 0, instant(9, 0, 1)),
            Punctuality::Late
        );
    }

    #[test]
    fn tolerance_crossing_midnight_stays_on_time() {
        let entry = time(23, 50, 0);
        assert_eq!(
            evaluate_punctuality(entry, 15, instant(23, 59, 59)),
            Punctuality::OnTime
        );
    }

    #[test]
    fn entry_window_closes_at_exit_time_exactly() {
        let exit = time(18, 0, 0);
        assert!(entry_window_open(exit, instant(17, 59, 59)));
        assert!(!entry_window_open(exit, instant(18, 0, 0)));
        assert!(!entry_window_open(exit, instant(18, 0, 1)));
    }
}
