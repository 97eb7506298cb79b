//! Session expiry notifications.

use strum::{AsRefStr, Display, IntoStaticStr};

/// Why a session could not be recovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ExpiryReason {
    /// A request was rejected and no refresh token was stored.
    MissingRefreshToken,
    /// The refresh endpoint rejected the refresh token or could not be reached.
    RefreshFailed,
    /// The request was rejected again after a successful refresh.
    RetryRejected,
}

/// Receives a notification when the stored session has been discarded.
///
/// The client has already cleared the [`SessionStore`](super::SessionStore)
/// when this is called; the host decides how to re-authenticate (redirect to
/// a login page, prompt, exit with a hint, ...).
pub trait SessionObserver: Send + Sync {
    /// Called once per unrecoverable authentication failure.
    fn session_expired(&self, reason: ExpiryReason);
}

impl<F> SessionObserver for F
where
    F: Fn(ExpiryReason) + Send + Sync,
{
    fn session_expired(&self, reason: ExpiryReason) {
        self(reason)
    }
}
