use bytes::Bytes;
use uuid::Uuid;

use crate::model::{
    Acknowledgement, Attendance, AttendanceReportRow, ExportFormat, MonthlyReportQuery,
    NewAttendance, ReportQuery,
};
use crate::{ApiClient, ApiRequest, Result};

/// Attendance tracking and reports (admin).
#[async_trait::async_trait]
pub trait AttendanceApi: Send + Sync {
    /// Records that a participant attended. At most once per participant,
    /// event and day; a duplicate is rejected as invalid input.
    async fn mark_attendance(&self, attendance: &NewAttendance) -> Result<Attendance>;

    async fn delete_attendance(&self, id: Uuid) -> Result<Acknowledgement>;

    /// Lists the attendance records of an event.
    async fn event_attendance(&self, event_id: Uuid) -> Result<Vec<Attendance>>;

    /// Attendance counts per participant.
    async fn attendance_report(&self, query: &ReportQuery) -> Result<Vec<AttendanceReportRow>>;

    /// Attendance counts per participant for one calendar month.
    async fn monthly_report(&self, query: &MonthlyReportQuery)
    -> Result<Vec<AttendanceReportRow>>;

    /// Downloads the attendance report as a file in the given format.
    async fn export_report(&self, query: &ReportQuery, format: ExportFormat) -> Result<Bytes>;
}

#[async_trait::async_trait]
impl AttendanceApi for ApiClient {
    async fn mark_attendance(&self, attendance: &NewAttendance) -> Result<Attendance> {
        self.fetch(ApiRequest::post("attendance").with_json(attendance)?).await
    }

    async fn delete_attendance(&self, id: Uuid) -> Result<Acknowledgement> {
        self.fetch(ApiRequest::delete(format!("attendance/{id}"))).await
    }

    async fn event_attendance(&self, event_id: Uuid) -> Result<Vec<Attendance>> {
        self.fetch(ApiRequest::get("attendance").with_param("event_id", event_id)).await
    }

    async fn attendance_report(&self, query: &ReportQuery) -> Result<Vec<AttendanceReportRow>> {
        self.fetch(ApiRequest::get("attendance/report").with_query(query)?).await
    }

    async fn monthly_report(
        &self,
        query: &MonthlyReportQuery,
    ) -> Result<Vec<AttendanceReportRow>> {
        self.fetch(ApiRequest::get("attendance/reports/monthly").with_query(query)?).await
    }

    async fn export_report(&self, query: &ReportQuery, format: ExportFormat) -> Result<Bytes> {
        let request = ApiRequest::get("attendance/reports/export")
            .with_query(query)?
            .with_param("format", format);
        self.fetch_bytes(request).await
    }
}
