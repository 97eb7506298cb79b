use anyhow::Context;
use clap::Subcommand;
use uuid::Uuid;
use village_client::{ApiClient, EventApi, EventQuery};

use super::print_json;

#[derive(Debug, Clone, Subcommand)]
pub enum EventsCommand {
    /// List events
    List {
        /// Free-text search
        #[arg(long)]
        query: Option<String>,
        /// Only events that have not happened yet
        #[arg(long)]
        upcoming: bool,
    },
    /// Show one event
    Show {
        id: Uuid,
    },
    /// Delete an event (admin)
    Delete {
        id: Uuid,
    },
}

impl EventsCommand {
    pub async fn execute(self, client: &ApiClient) -> anyhow::Result<()> {
        match self {
            Self::List { query, upcoming } => {
                let query = EventQuery {
                    q: query,
                    upcoming: upcoming.then_some(true),
                };
                let events = client
                    .list_events(&query)
                    .await
                    .context("failed to list events")?;
                print_json(&events)
            }
            Self::Show { id } => {
                let event = client.event(id).await.context("failed to load event")?;
                print_json(&event)
            }
            Self::Delete { id } => {
                let event = client
                    .delete_event(id)
                    .await
                    .context("failed to delete event")?;
                print_json(&event)
            }
        }
    }
}
