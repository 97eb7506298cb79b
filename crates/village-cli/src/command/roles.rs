use anyhow::Context;
use clap::Subcommand;
use uuid::Uuid;
use village_client::{ApiClient, RoleApi};

use super::print_json;

#[derive(Debug, Clone, Subcommand)]
pub enum RolesCommand {
    /// List the roles of an event
    List {
        event_id: Uuid,
    },
    /// Give a participant a role (admin)
    Assign {
        participant_id: Uuid,
        role_id: Uuid,
    },
    /// Take a participant's role away (admin)
    Unassign {
        participant_id: Uuid,
    },
}

impl RolesCommand {
    pub async fn execute(self, client: &ApiClient) -> anyhow::Result<()> {
        match self {
            Self::List { event_id } => {
                let roles = client
                    .event_roles(event_id)
                    .await
                    .context("failed to list roles")?;
                print_json(&roles)
            }
            Self::Assign {
                participant_id,
                role_id,
            } => {
                let participant = client
                    .assign_role(participant_id, role_id)
                    .await
                    .context("failed to assign role")?;
                print_json(&participant)
            }
            Self::Unassign { participant_id } => {
                let participant = client
                    .unassign_role(participant_id)
                    .await
                    .context("failed to unassign role")?;
                print_json(&participant)
            }
        }
    }
}
