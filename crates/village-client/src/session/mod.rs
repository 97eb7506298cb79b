//! Credential storage and session lifecycle notifications.
//!
//! The access layer never touches ambient global state: credentials are read
//! and written through a [`SessionStore`] handed to the client at construction,
//! and unrecoverable authentication failures are reported to a
//! [`SessionObserver`] instead of navigating anywhere.

mod file;
mod memory;
mod observer;

use std::fmt;

pub use file::FileSessionStore;
pub use memory::MemorySessionStore;
pub use observer::{ExpiryReason, SessionObserver};
use serde::{Deserialize, Serialize};

use crate::Result;

/// Tracing target for session operations.
pub const TRACING_TARGET: &str = "village_client::session";

/// Storage for the access/refresh token pair.
///
/// Individual operations must be atomic; multi-step sequences (such as a
/// refresh cycle) are serialised by the client, not by the store.
pub trait SessionStore: Send + Sync {
    /// Returns the current access token, if any.
    fn access_token(&self) -> Option<String>;

    /// Returns the current refresh token, if any.
    fn refresh_token(&self) -> Option<String>;

    /// Replaces both tokens.
    fn save(&self, access_token: &str, refresh_token: &str) -> Result<()>;

    /// Removes both tokens.
    fn clear(&self) -> Result<()>;
}

/// Persisted credential pair.
///
/// Serialized field names match the fixed storage keys `access_token` and
/// `refresh_token`.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Short-lived bearer token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// Longer-lived token exchanged for a new pair.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl Credentials {
    /// Creates a full credential pair.
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: Some(access_token.into()),
            refresh_token: Some(refresh_token.into()),
        }
    }

    /// Returns true if neither token is present.
    pub fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("has_access_token", &self.access_token.is_some())
            .field("has_refresh_token", &self.refresh_token.is_some())
            .finish()
    }
}
