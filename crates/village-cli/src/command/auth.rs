use anyhow::Context;
use clap::Args;
use village_client::{ApiClient, AuthApi};

use super::print_json;
use crate::TRACING_TARGET_SESSION;

/// Credentials for `village login`.
#[derive(Clone, Args)]
pub struct LoginArgs {
    /// Email address or phone number
    pub identifier: String,

    /// Account password
    #[arg(long, env = "VILLAGE_PASSWORD", hide_env_values = true)]
    pub password: String,
}

impl std::fmt::Debug for LoginArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginArgs")
            .field("identifier", &self.identifier)
            .finish_non_exhaustive()
    }
}

pub async fn login(client: &ApiClient, args: LoginArgs) -> anyhow::Result<()> {
    client
        .login(&args.identifier, &args.password)
        .await
        .context("login failed")?;

    let user = client
        .me()
        .await
        .context("failed to load the signed-in account")?;

    tracing::info!(
        target: TRACING_TARGET_SESSION,
        user = %user.display_name(),
        "Signed in"
    );
    print_json(&user)
}

pub async fn logout(client: &ApiClient) -> anyhow::Result<()> {
    AuthApi::logout(client)
        .await
        .context("failed to clear the session")?;

    tracing::info!(target: TRACING_TARGET_SESSION, "Signed out");
    Ok(())
}

pub async fn me(client: &ApiClient) -> anyhow::Result<()> {
    let user = client
        .me()
        .await
        .context("failed to load the signed-in account")?;
    print_json(&user)
}

pub async fn refresh(client: &ApiClient) -> anyhow::Result<()> {
    let tokens = client
        .refresh_session()
        .await
        .context("failed to refresh the session")?;

    tracing::info!(
        target: TRACING_TARGET_SESSION,
        token_type = %tokens.token_type,
        "Session refreshed"
    );
    Ok(())
}
