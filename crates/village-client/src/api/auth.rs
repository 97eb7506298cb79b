use super::TRACING_TARGET;
use crate::model::{EmailSignup, LoginRequest, PhoneSignup, TokenPair, User};
use crate::{ApiClient, ApiRequest, Result};

/// Account authentication and session management.
#[async_trait::async_trait]
pub trait AuthApi: Send + Sync {
    /// Logs in with an email address or phone number and stores the issued pair.
    ///
    /// Surrounding whitespace in `identifier` is ignored.
    async fn login(&self, identifier: &str, password: &str) -> Result<TokenPair>;

    /// Creates an account identified by email.
    async fn signup_email(&self, signup: &EmailSignup) -> Result<User>;

    /// Creates an account identified by phone number.
    async fn signup_phone(&self, signup: &PhoneSignup) -> Result<User>;

    /// Returns the authenticated user.
    async fn me(&self) -> Result<User>;

    /// Rotates the stored token pair.
    async fn refresh_session(&self) -> Result<TokenPair>;

    /// Forgets the stored session. Makes no network call.
    async fn logout(&self) -> Result<()>;
}

#[async_trait::async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, identifier: &str, password: &str) -> Result<TokenPair> {
        let body = LoginRequest::new(identifier, password);
        let request = ApiRequest::post("auth/login").with_json(&body)?.anonymous();

        let tokens: TokenPair = self.fetch(request).await?;
        self.save_session(&tokens)?;

        tracing::info!(target: TRACING_TARGET, "Logged in");
        Ok(tokens)
    }

    async fn signup_email(&self, signup: &EmailSignup) -> Result<User> {
        let request = ApiRequest::post("auth/signup/email")
            .with_json(signup)?
            .anonymous();
        self.fetch(request).await
    }

    async fn signup_phone(&self, signup: &PhoneSignup) -> Result<User> {
        let request = ApiRequest::post("auth/signup/phone")
            .with_json(signup)?
            .anonymous();
        self.fetch(request).await
    }

    async fn me(&self) -> Result<User> {
        self.fetch(ApiRequest::get("auth/me")).await
    }

    async fn refresh_session(&self) -> Result<TokenPair> {
        self.refresh().await
    }

    async fn logout(&self) -> Result<()> {
        ApiClient::logout(self)
    }
}
