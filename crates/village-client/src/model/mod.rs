//! Typed request and response payloads.
//!
//! These mirror the backend schemas and are decoded as-is; the client does not
//! validate, transform or cache them.

mod announcement;
mod attendance;
mod auth;
mod event;
mod participant;
mod recurrence;
mod role;
mod user;

pub use announcement::{Announcement, AnnouncementDraft};
pub use attendance::{
    Attendance, AttendanceReportRow, ExportFormat, MonthlyReportQuery, NewAttendance, ReportQuery,
};
pub use auth::{EmailSignup, LoginRequest, PhoneSignup, RefreshRequest, TokenPair};
pub use event::{Event, EventQuery, EventUpdate, NewEvent};
pub use participant::{AdminRegistration, NewParticipant, Participant, Registration};
pub use recurrence::{Frequency, NewRecurrence, Recurrence, RecurrenceUpdate};
pub use role::{NewRole, Role, RoleUpdate};
use serde::{Deserialize, Serialize};
pub use user::{User, UserUpdate};

/// A response body that is either wrapped as `{"success": true, "data": …}`
/// or returned bare.
///
/// Several backend routes use the envelope and others do not; callers only
/// ever see the inner value.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Payload<T> {
    /// `{"success": …, "data": T}`
    Envelope {
        /// The wrapped value.
        data: T,
    },
    /// `T` on its own.
    Bare(T),
}

impl<T> Payload<T> {
    /// Unwraps the payload.
    pub fn into_inner(self) -> T {
        match self {
            Self::Envelope { data } => data,
            Self::Bare(data) => data,
        }
    }
}

/// Generic `{"success": true, "message": …}` acknowledgement returned by
/// delete-style endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    /// Whether the backend reported success.
    #[serde(default)]
    pub success: bool,
    /// Optional human-readable message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_envelope() {
        let json = r#"{"success": true, "data": [1, 2, 3]}"#;
        let payload: Payload<Vec<u32>> = serde_json::from_str(json).unwrap();
        assert_eq!(payload.into_inner(), vec![1, 2, 3]);
    }

    #[test]
    fn test_payload_bare() {
        let payload: Payload<Vec<u32>> = serde_json::from_str("[4, 5]").unwrap();
        assert_eq!(payload.into_inner(), vec![4, 5]);
    }

    #[test]
    fn test_acknowledgement() {
        let json = r#"{"success": true, "deleted_id": "abc"}"#;
        let ack: Acknowledgement = serde_json::from_str(json).unwrap();
        assert!(ack.success);
        assert!(ack.message.is_none());

        let json = r#"{"success": true, "message": "You were not registered for this event."}"#;
        let ack = serde_json::from_str::<Payload<Acknowledgement>>(json)
            .unwrap()
            .into_inner();
        assert_eq!(
            ack.message.as_deref(),
            Some("You were not registered for this event.")
        );
    }
}
