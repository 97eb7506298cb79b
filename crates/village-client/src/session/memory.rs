//! In-process session store.

use std::sync::{PoisonError, RwLock};

use super::{Credentials, SessionStore};
use crate::Result;

/// Session store that keeps credentials in memory for the life of the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    credentials: RwLock<Credentials>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the given credentials.
    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            credentials: RwLock::new(credentials),
        }
    }

    /// Returns a snapshot of the stored credentials.
    pub fn credentials(&self) -> Credentials {
        self.credentials
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SessionStore for MemorySessionStore {
    fn access_token(&self) -> Option<String> {
        self.credentials
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .access_token
            .clone()
    }

    fn refresh_token(&self) -> Option<String> {
        self.credentials
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .refresh_token
            .clone()
    }

    fn save(&self, access_token: &str, refresh_token: &str) -> Result<()> {
        let mut guard = self
            .credentials
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Credentials::new(access_token, refresh_token);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut guard = self
            .credentials
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Credentials::default();
        Ok(())
    }
}
