//! Authenticated HTTP client with token refresh.

use std::sync::Arc;
use std::time::Instant;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};
use tokio::sync::Mutex;
use url::Url;

use super::{ApiRequest, ApiResponse, Attempt, TRACING_TARGET};
use crate::model::{RefreshRequest, TokenPair};
use crate::session::{ExpiryReason, SessionObserver, SessionStore};
use crate::{ClientConfig, Error, Result};

/// Inner client that holds the HTTP client, configuration and session.
struct ApiClientInner {
    http: Client,
    config: ClientConfig,
    base_url: Url,
    store: Arc<dyn SessionStore>,
    observer: Option<Arc<dyn SessionObserver>>,
    /// Serialises refresh cycles so concurrent 401s share one refresh.
    /// Shared by every client derived from the same [`ApiClient::new`] call.
    refresh_gate: Arc<Mutex<()>>,
}

/// HTTP client for the village backend.
///
/// Attaches the stored access token to every request. When the backend
/// answers `401 Unauthorized`, the client exchanges the refresh token for a
/// new pair and replays the request once. If that is impossible (no refresh
/// token, refresh rejected, or the replay is rejected too), the session store
/// is cleared and the [`SessionObserver`] is notified.
///
/// # Examples
///
/// ```rust,ignore
/// use std::sync::Arc;
///
/// use village_client::{ApiClient, ApiRequest, ClientConfig, MemorySessionStore};
///
/// let client = ApiClient::new(ClientConfig::default(), Arc::new(MemorySessionStore::new()))?
///     .with_observer(|reason| eprintln!("session expired: {reason}"));
///
/// let response = client.send(&ApiRequest::get("events")).await?;
/// ```
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("config", &self.inner.config)
            .field("has_observer", &self.inner.observer.is_some())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Creates a new client with the given configuration and session store.
    pub fn new(config: ClientConfig, store: Arc<dyn SessionStore>) -> Result<Self> {
        let base_url = config.base_url()?;
        let timeout = config.effective_timeout();
        let user_agent = config.effective_user_agent();

        tracing::debug!(
            target: TRACING_TARGET,
            base_url = %base_url,
            timeout_ms = timeout.as_millis(),
            "Creating API client"
        );

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(&user_agent)
            .build()?;

        let inner = ApiClientInner {
            http,
            config,
            base_url,
            store,
            observer: None,
            refresh_gate: Arc::new(Mutex::new(())),
        };

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Creates a client that notifies `observer` whenever the session expires.
    ///
    /// The observer is shared by every clone of the returned client. The
    /// session store and refresh gate stay shared with `self` and its clones.
    pub fn with_observer(self, observer: impl SessionObserver + 'static) -> Self {
        let inner = &self.inner;
        Self {
            inner: Arc::new(ApiClientInner {
                http: inner.http.clone(),
                config: inner.config.clone(),
                base_url: inner.base_url.clone(),
                store: Arc::clone(&inner.store),
                observer: Some(Arc::new(observer)),
                refresh_gate: Arc::clone(&inner.refresh_gate),
            }),
        }
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Gets the normalised base URL every request path is joined to.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Gets the session store.
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.inner.store
    }

    /// Returns true if an access token is currently stored.
    pub fn is_authenticated(&self) -> bool {
        self.inner.store.access_token().is_some()
    }

    /// Sends a request, refreshing the session and replaying it once on `401`.
    ///
    /// Non-success statuses other than the unrecoverable `401` cases are
    /// returned as `Ok`; use [`ApiResponse::error_for_status`] to turn them
    /// into errors.
    pub async fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let mut attempt = Attempt::Initial;
        let mut token = if request.anonymous {
            None
        } else {
            self.inner.store.access_token()
        };

        loop {
            let response = self.execute(request, token.as_deref(), attempt).await?;
            if request.anonymous || response.status() != StatusCode::UNAUTHORIZED {
                return Ok(response);
            }

            let error = response.into_error();
            match attempt {
                Attempt::Initial => {
                    token = Some(self.recover(token.as_deref(), error).await?);
                    attempt = Attempt::Retry;
                }
                Attempt::Retry => {
                    return Err(self.expire(ExpiryReason::RetryRejected, error));
                }
            }
        }
    }

    /// Exchanges the stored refresh token for a new pair and persists it.
    ///
    /// Unlike the automatic refresh inside [`send`](Self::send), a failure
    /// here leaves the stored credentials untouched.
    pub async fn refresh(&self) -> Result<TokenPair> {
        let _gate = self.inner.refresh_gate.lock().await;

        let refresh_token = self.inner.store.refresh_token().ok_or_else(|| {
            Error::authentication().with_message("no refresh token is stored")
        })?;

        self.exchange(&refresh_token).await
    }

    /// Stores a freshly issued token pair.
    pub fn save_session(&self, tokens: &TokenPair) -> Result<()> {
        self.inner
            .store
            .save(&tokens.access_token, &tokens.refresh_token)
    }

    /// Discards the stored session locally.
    pub fn logout(&self) -> Result<()> {
        tracing::info!(target: TRACING_TARGET, "Clearing session");
        self.inner.store.clear()
    }

    /// Obtains a token to replay a request that was rejected with `401`.
    ///
    /// Waits for any refresh already in flight. If it installed a token other
    /// than the one that was rejected, that token is reused instead of
    /// refreshing again.
    async fn recover(&self, rejected: Option<&str>, error: Error) -> Result<String> {
        let _gate = self.inner.refresh_gate.lock().await;

        if let Some(current) = self.inner.store.access_token() {
            if rejected != Some(current.as_str()) {
                tracing::debug!(
                    target: TRACING_TARGET,
                    "Reusing access token refreshed by a concurrent request"
                );
                return Ok(current);
            }
        }

        let Some(refresh_token) = self.inner.store.refresh_token() else {
            return Err(self.expire(ExpiryReason::MissingRefreshToken, error));
        };

        match self.exchange(&refresh_token).await {
            Ok(tokens) => Ok(tokens.access_token),
            Err(refresh_error) => Err(self.expire(
                ExpiryReason::RefreshFailed,
                error.with_source(refresh_error),
            )),
        }
    }

    /// Calls `POST auth/refresh` and persists the rotated pair.
    ///
    /// Callers must hold the refresh gate. Goes through [`execute`](Self::execute)
    /// directly so a rejected refresh never triggers another refresh.
    async fn exchange(&self, refresh_token: &str) -> Result<TokenPair> {
        let request = ApiRequest::post("auth/refresh")
            .with_json(&RefreshRequest::new(refresh_token))?
            .anonymous();

        let tokens: TokenPair = self
            .execute(&request, None, Attempt::Initial)
            .await
            .and_then(ApiResponse::error_for_status)
            .and_then(|response| response.payload())
            .map_err(|err| {
                tracing::warn!(target: TRACING_TARGET, error = %err, "Token refresh failed");
                Error::authentication()
                    .with_message("token refresh failed")
                    .with_source(err)
            })?;

        self.save_session(&tokens)?;

        tracing::info!(target: TRACING_TARGET, "Session refreshed");
        Ok(tokens)
    }

    /// Clears the session, notifies the observer and returns the error.
    fn expire(&self, reason: ExpiryReason, error: Error) -> Error {
        tracing::warn!(
            target: TRACING_TARGET,
            reason = %reason,
            "Session expired"
        );

        if let Err(err) = self.inner.store.clear() {
            tracing::error!(
                target: TRACING_TARGET,
                error = %err,
                "Failed to clear session store"
            );
        }

        if let Some(observer) = &self.inner.observer {
            observer.session_expired(reason);
        }

        error
    }

    /// Performs a single HTTP exchange and buffers the response.
    async fn execute(
        &self,
        request: &ApiRequest,
        token: Option<&str>,
        attempt: Attempt,
    ) -> Result<ApiResponse> {
        let url = self
            .inner
            .base_url
            .join(request.path.trim_start_matches('/'))?;

        let mut builder = self.inner.http.request(request.method.clone(), url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            if name.eq_ignore_ascii_case(AUTHORIZATION.as_str()) {
                continue;
            }
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let started_at = Instant::now();
        let response = builder.send().await.map_err(|err| {
            tracing::warn!(
                target: TRACING_TARGET,
                method = %request.method,
                path = %request.path,
                attempt = %attempt,
                error = %err,
                "Request failed"
            );
            Error::from(err)
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        tracing::debug!(
            target: TRACING_TARGET,
            method = %request.method,
            path = %request.path,
            attempt = %attempt,
            status = status.as_u16(),
            elapsed_ms = started_at.elapsed().as_millis() as u64,
            "Request completed"
        );

        Ok(ApiResponse::new(status, headers, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemorySessionStore;

    fn client(api_url: &str) -> Result<ApiClient> {
        ApiClient::new(
            ClientConfig::new(api_url),
            Arc::new(MemorySessionStore::new()),
        )
    }

    #[test]
    fn test_new_normalises_base_url() {
        let client = client("http://localhost:8000/api").unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:8000/api/");
        assert!(!client.is_authenticated());
    }

    #[test]
    fn test_new_rejects_bad_url() {
        let error = client("ftp://example.com").unwrap_err();
        assert_eq!(error.kind, crate::ErrorKind::Configuration);

        assert!(client("not a url").is_err());
    }

    #[test]
    fn test_debug_hides_store() {
        let client = client("http://localhost:8000/api")
            .unwrap()
            .with_observer(|_reason: ExpiryReason| {});
        let debug = format!("{client:?}");
        assert!(debug.contains("has_observer: true"));
    }

    #[test]
    fn test_with_observer_shares_refresh_gate() {
        let plain = client("http://localhost:8000/api").unwrap();
        let observed = plain.clone().with_observer(|_reason: ExpiryReason| {});

        assert!(Arc::ptr_eq(
            &plain.inner.refresh_gate,
            &observed.inner.refresh_gate
        ));
        assert!(Arc::ptr_eq(plain.store(), observed.store()));
    }

    #[tokio::test]
    async fn test_refresh_requires_refresh_token() {
        let client = client("http://localhost:8000/api").unwrap();
        let error = client.refresh().await.unwrap_err();
        assert!(error.is_session_expired());
    }

    #[test]
    fn test_logout_clears_store() {
        let store = Arc::new(MemorySessionStore::new());
        store.save("A1", "R1").unwrap();

        let client = ApiClient::new(ClientConfig::default(), store.clone()).unwrap();
        assert!(client.is_authenticated());

        client.logout().unwrap();
        assert!(store.access_token().is_none());
        assert!(store.refresh_token().is_none());
    }
}
