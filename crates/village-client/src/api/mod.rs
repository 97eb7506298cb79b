//! Typed wrappers over the backend REST endpoints.
//!
//! Each backend area is an async trait implemented for [`ApiClient`]. The
//! wrappers only build paths and bodies; authentication, refresh and error
//! classification all happen in [`ApiClient::send`].

mod announcements;
mod attendance;
mod auth;
mod events;
mod participants;
mod recurrences;
mod roles;
mod users;

pub use announcements::AnnouncementApi;
pub use attendance::AttendanceApi;
pub use auth::AuthApi;
use bytes::Bytes;
pub use events::EventApi;
pub use participants::ParticipantApi;
pub use recurrences::RecurrenceApi;
pub use roles::RoleApi;
use serde::de::DeserializeOwned;
pub use users::UserApi;

use crate::{ApiClient, ApiRequest, ApiResponse, Result};

/// Tracing target for domain operations.
pub const TRACING_TARGET: &str = "village_client::api";

impl ApiClient {
    /// Sends `request` and fails on any non-success status.
    pub(crate) async fn send_checked(&self, request: ApiRequest) -> Result<ApiResponse> {
        let response = self.send(&request).await?;
        response.error_for_status().inspect_err(|err| {
            tracing::debug!(
                target: TRACING_TARGET,
                method = %request.method,
                path = %request.path,
                error = %err,
                "Request rejected"
            );
        })
    }

    /// Sends `request` and decodes the (possibly enveloped) JSON payload.
    pub(crate) async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        self.send_checked(request).await?.payload()
    }

    /// Sends `request` and returns the raw body.
    pub(crate) async fn fetch_bytes(&self, request: ApiRequest) -> Result<Bytes> {
        Ok(self.send_checked(request).await?.into_bytes())
    }
}
