use std::fmt;

use serde::{Deserialize, Serialize};

/// Access/refresh token pair issued by login and refresh.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived bearer token.
    pub access_token: String,
    /// Token exchanged for the next pair; rotated on every refresh.
    pub refresh_token: String,
    /// Always `bearer`.
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_owned()
}

impl TokenPair {
    /// Creates a bearer token pair.
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            token_type: default_token_type(),
        }
    }
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("token_type", &self.token_type)
            .finish_non_exhaustive()
    }
}

/// Body of `POST /auth/login`.
#[derive(Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Email address or phone number.
    pub identifier: String,
    pub password: String,
}

impl LoginRequest {
    /// Creates a login request, trimming surrounding whitespace from the identifier.
    pub fn new(identifier: impl AsRef<str>, password: impl Into<String>) -> Self {
        Self {
            identifier: identifier.as_ref().trim().to_owned(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("identifier", &self.identifier)
            .finish_non_exhaustive()
    }
}

/// Body of `POST /auth/refresh`.
#[derive(Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

impl RefreshRequest {
    /// Wraps the refresh token to exchange.
    pub fn new(refresh_token: impl Into<String>) -> Self {
        Self {
            refresh_token: refresh_token.into(),
        }
    }
}

impl fmt::Debug for RefreshRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshRequest").finish_non_exhaustive()
    }
}

/// Body of `POST /auth/signup/email`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailSignup {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

/// Body of `POST /auth/signup/phone`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhoneSignup {
    pub phone: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}
