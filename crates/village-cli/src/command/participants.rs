use anyhow::Context;
use clap::Subcommand;
use uuid::Uuid;
use village_client::{ApiClient, ParticipantApi};

use super::print_json;

#[derive(Debug, Clone, Subcommand)]
pub enum ParticipantsCommand {
    /// List the participants of an event
    List {
        event_id: Uuid,
    },
    /// Remove a user from an event (admin)
    Remove {
        event_id: Uuid,
        user_id: Uuid,
    },
}

impl ParticipantsCommand {
    pub async fn execute(self, client: &ApiClient) -> anyhow::Result<()> {
        match self {
            Self::List { event_id } => {
                let participants = client
                    .event_participants(event_id)
                    .await
                    .context("failed to list participants")?;
                print_json(&participants)
            }
            Self::Remove { event_id, user_id } => {
                let ack = client
                    .remove_participant(event_id, user_id)
                    .await
                    .context("failed to remove participant")?;
                print_json(&ack)
            }
        }
    }
}
