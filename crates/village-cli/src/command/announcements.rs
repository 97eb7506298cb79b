use anyhow::Context;
use clap::Subcommand;
use uuid::Uuid;
use village_client::{AnnouncementApi, ApiClient};

use super::print_json;

#[derive(Debug, Clone, Subcommand)]
pub enum AnnouncementsCommand {
    /// List announcements
    List,
    /// Show one announcement
    Show {
        id: Uuid,
    },
}

impl AnnouncementsCommand {
    pub async fn execute(self, client: &ApiClient) -> anyhow::Result<()> {
        match self {
            Self::List => {
                let announcements = client
                    .list_announcements()
                    .await
                    .context("failed to list announcements")?;
                print_json(&announcements)
            }
            Self::Show { id } => {
                let announcement = client
                    .announcement(id)
                    .await
                    .context("failed to load announcement")?;
                print_json(&announcement)
            }
        }
    }
}
