//! JSON file-backed session store.

use std::fs;
use std::io::{ErrorKind as IoErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use tempfile::NamedTempFile;

use super::{Credentials, SessionStore, TRACING_TARGET};
use crate::Result;

/// Session store persisted as a small JSON document on disk.
///
/// The file is read once on open; every mutation rewrites it. Writes go to a
/// temporary file in the same directory that is then renamed over the
/// session file, and on unix the file is only readable by its owner.
/// Clearing the session removes the file.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    credentials: RwLock<Credentials>,
}

impl FileSessionStore {
    /// Opens the store at `path`, loading existing credentials if the file exists.
    ///
    /// A file that cannot be decoded is treated as an empty session and is
    /// overwritten by the next save.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let credentials = match fs::read(&path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Credentials::default(),
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|err| {
                tracing::warn!(
                    target: TRACING_TARGET,
                    path = %path.display(),
                    error = %err,
                    "Ignoring unreadable session file"
                );
                Credentials::default()
            }),
            Err(err) if err.kind() == IoErrorKind::NotFound => Credentials::default(),
            Err(err) => return Err(err.into()),
        };

        tracing::debug!(
            target: TRACING_TARGET,
            path = %path.display(),
            has_session = !credentials.is_empty(),
            "Opened session file"
        );

        Ok(Self {
            path,
            credentials: RwLock::new(credentials),
        })
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, credentials: &Credentials) -> Result<()> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let bytes = serde_json::to_vec_pretty(credentials)?;

        let mut file = NamedTempFile::new_in(parent)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.as_file()
                .set_permissions(fs::Permissions::from_mode(0o600))?;
        }
        file.write_all(&bytes)?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|err| err.error)?;

        Ok(())
    }
}

impl SessionStore for FileSessionStore {
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

        let credentials = Credentials::new(access_token, refresh_token);
        self.persist(&credentials)?;
        *guard = credentials;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut guard = self
            .credentials
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Credentials::default();

        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(err) if err.kind() == IoErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }

        tracing::debug!(
            target: TRACING_TARGET,
            path = %self.path.display(),
            "Cleared session file"
        );

        Ok(())
    }
}
