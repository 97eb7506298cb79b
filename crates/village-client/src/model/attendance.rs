use jiff::Timestamp;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use uuid::Uuid;

/// A recorded attendance of one participant at one event on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendance {
    pub id: Uuid,
    pub event_id: Uuid,
    pub participant_id: Uuid,
    pub attended_at: Timestamp,
    /// Calendar day the attendance counts for; unique per participant and event.
    pub attendance_day: Date,
    #[serde(default)]
    pub marked_by: Option<Uuid>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Body of `POST /attendance`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAttendance {
    pub event_id: Uuid,
    pub participant_id: Uuid,
    /// Defaults to the server's current time when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attended_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewAttendance {
    /// Records `participant_id` as present at `event_id`.
    pub fn new(event_id: Uuid, participant_id: Uuid) -> Self {
        Self {
            event_id,
            participant_id,
            attended_at: None,
            notes: None,
        }
    }

    /// Attaches a free-form note.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Sets when the participant attended.
    pub fn at(mut self, attended_at: Timestamp) -> Self {
        self.attended_at = Some(attended_at);
        self
    }
}

/// Aggregated attendance count for one participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceReportRow {
    pub participant_id: Uuid,
    pub attended_count: i64,
}

/// Filters for `GET /attendance/report`; an empty query covers all time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Date>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Date>,
}

impl ReportQuery {
    /// Restricts the report to one event.
    pub fn for_event(event_id: Uuid) -> Self {
        Self {
            event_id: Some(event_id),
            ..Self::default()
        }
    }

    /// Restricts the report to an inclusive date range.
    pub fn between(mut self, start: Date, end: Date) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }
}

/// Filters for `GET /attendance/reports/monthly`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyReportQuery {
    pub year: i16,
    /// 1-based month.
    pub month: i8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<Uuid>,
}

impl MonthlyReportQuery {
    /// Report for the month containing `date`.
    pub fn containing(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            event_id: None,
        }
    }

    /// Restricts the report to one event.
    pub fn with_event(mut self, event_id: Uuid) -> Self {
        self.event_id = Some(event_id);
        self
    }
}

/// File format of `GET /attendance/reports/export`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, AsRefStr, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Xlsx,
}
