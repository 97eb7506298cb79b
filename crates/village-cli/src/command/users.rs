use anyhow::Context;
use clap::Subcommand;
use village_client::{ApiClient, UserApi};

use super::print_json;

#[derive(Debug, Clone, Subcommand)]
pub enum UsersCommand {
    /// List all accounts (admin)
    List,
}

impl UsersCommand {
    pub async fn execute(self, client: &ApiClient) -> anyhow::Result<()> {
        match self {
            Self::List => {
                let users = client.list_users().await.context("failed to list users")?;
                print_json(&users)
            }
        }
    }
}
