//! Session persistence configuration.

use std::path::PathBuf;

use clap::Args;

/// Default location of the session file, relative to the working directory.
pub const DEFAULT_SESSION_FILE: &str = ".village/session.json";

/// Where the access/refresh token pair is kept between invocations.
#[derive(Debug, Clone, Args)]
pub struct SessionConfig {
    /// Path of the JSON file holding the session tokens
    #[arg(
        long = "session-file",
        env = "VILLAGE_SESSION_FILE",
        default_value = DEFAULT_SESSION_FILE
    )]
    pub session_file: PathBuf,
}
