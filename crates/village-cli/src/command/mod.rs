//! Subcommands.

mod announcements;
mod attendance;
mod auth;
mod events;
mod participants;
mod roles;
mod users;

use std::io::Write;

use anyhow::Context;
use clap::Subcommand;
use serde::Serialize;
use uuid::Uuid;
use village_client::{ApiClient, ParticipantApi};

pub use self::announcements::AnnouncementsCommand;
pub use self::attendance::AttendanceCommand;
pub use self::auth::LoginArgs;
pub use self::events::EventsCommand;
pub use self::participants::ParticipantsCommand;
pub use self::roles::RolesCommand;
pub use self::users::UsersCommand;

/// Operation to perform against the backend.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Log in and store the session
    Login(LoginArgs),
    /// Forget the stored session
    Logout,
    /// Show the signed-in account
    Me,
    /// Rotate the stored session tokens
    Refresh,
    /// Browse and manage events
    #[command(subcommand)]
    Events(EventsCommand),
    /// Read announcements
    #[command(subcommand)]
    Announcements(AnnouncementsCommand),
    /// List event participants
    #[command(subcommand)]
    Participants(ParticipantsCommand),
    /// Register the signed-in account for an event
    Register {
        /// Event to register for
        event_id: Uuid,
    },
    /// Withdraw the signed-in account from an event
    Unregister {
        /// Event to withdraw from
        event_id: Uuid,
    },
    /// Inspect and assign event roles
    #[command(subcommand)]
    Roles(RolesCommand),
    /// Attendance records and reports
    #[command(subcommand)]
    Attendance(AttendanceCommand),
    /// Manage user accounts
    #[command(subcommand)]
    Users(UsersCommand),
}

impl Command {
    /// Runs the command, printing its result to stdout.
    pub async fn execute(self, client: &ApiClient) -> anyhow::Result<()> {
        match self {
            Self::Login(args) => auth::login(client, args).await,
            Self::Logout => auth::logout(client).await,
            Self::Me => auth::me(client).await,
            Self::Refresh => auth::refresh(client).await,
            Self::Events(command) => command.execute(client).await,
            Self::Announcements(command) => command.execute(client).await,
            Self::Participants(command) => command.execute(client).await,
            Self::Register { event_id } => {
                let registration = client
                    .register(event_id)
                    .await
                    .context("failed to register for event")?;
                print_json(&registration)
            }
            Self::Unregister { event_id } => {
                let ack = client
                    .unregister(event_id)
                    .await
                    .context("failed to unregister from event")?;
                print_json(&ack)
            }
            Self::Roles(command) => command.execute(client).await,
            Self::Attendance(command) => command.execute(client).await,
            Self::Users(command) => command.execute(client).await,
        }
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Login(_) => "login",
            Self::Logout => "logout",
            Self::Me => "me",
            Self::Refresh => "refresh",
            Self::Events(_) => "events",
            Self::Announcements(_) => "announcements",
            Self::Participants(_) => "participants",
            Self::Register { .. } => "register",
            Self::Unregister { .. } => "unregister",
            Self::Roles(_) => "roles",
            Self::Attendance(_) => "attendance",
            Self::Users(_) => "users",
        }
    }
}

/// Writes `value` to stdout as pretty-printed JSON.
fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value).context("failed to encode output")?;
    writeln!(stdout).context("failed to write output")?;
    Ok(())
}
