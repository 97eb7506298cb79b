#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod model;
pub mod session;

pub use api::{
    AnnouncementApi, AttendanceApi, AuthApi, EventApi, ParticipantApi, RecurrenceApi, RoleApi,
    UserApi,
};
pub use config::ClientConfig;
pub use error::{BoxedError, Error, ErrorKind, Result};
pub use http::{ApiClient, ApiRequest, ApiResponse, Attempt};
pub use model::{
    Acknowledgement, AdminRegistration, Announcement, AnnouncementDraft, Attendance,
    AttendanceReportRow, EmailSignup, Event, EventQuery, EventUpdate, ExportFormat, Frequency,
    LoginRequest, MonthlyReportQuery, NewAttendance, NewEvent, NewParticipant, NewRecurrence,
    NewRole, Participant, Payload, PhoneSignup, Recurrence, RecurrenceUpdate, RefreshRequest,
    Registration, ReportQuery, Role, RoleUpdate, TokenPair, User, UserUpdate,
};
pub use session::{
    Credentials, ExpiryReason, FileSessionStore, MemorySessionStore, SessionObserver,
    SessionStore,
};
