//! Bearer attachment, refresh-and-retry and session expiry against a mock backend.

mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use common::MockBackend;
use village_client::{
    AnnouncementApi, ApiClient, ApiRequest, AuthApi, ClientConfig, ErrorKind, EventApi,
    EventQuery, ExpiryReason, MemorySessionStore, SessionStore,
};

type ExpiryLog = Arc<Mutex<Vec<ExpiryReason>>>;

fn expiry_log() -> (ExpiryLog, impl Fn(ExpiryReason) + Send + Sync + 'static) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = log.clone();
    (log, move |reason: ExpiryReason| sink.lock().unwrap().push(reason))
}

#[tokio::test]
async fn attaches_stored_access_token() {
    let backend = MockBackend::start().await;
    let (access, refresh) = backend.state.issue();
    let (client, _store) = backend.client_with_session(&access, &refresh);

    client.me().await.unwrap();

    let requests = backend.state.requests_to("/api/auth/me");
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].authorization.as_deref(), Some("Bearer A1"));
}

#[tokio::test]
async fn sends_without_header_when_no_token_is_stored() {
    let backend = MockBackend::start().await;
    let client = backend.client(Arc::new(MemorySessionStore::new()));

    let announcements = client.list_announcements().await.unwrap();
    assert_eq!(announcements.len(), 1);

    let requests = backend.state.requests_to("/api/announcements");
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].authorization, None);
    assert_eq!(backend.state.refresh_calls(), 0);
}

#[tokio::test]
async fn login_then_me_uses_issued_token() {
    let backend = MockBackend::start().await;
    let store = Arc::new(MemorySessionStore::new());
    let client = backend.client(store.clone());

    let tokens = client.login("  user@example.com ", "secret").await.unwrap();
    assert_eq!(tokens.access_token, "A1");
    assert_eq!(tokens.refresh_token, "R1");
    assert_eq!(store.access_token().as_deref(), Some("A1"));
    assert_eq!(store.refresh_token().as_deref(), Some("R1"));

    let user = client.me().await.unwrap();
    assert_eq!(user.email.as_deref(), Some("user@example.com"));

    let me = backend.state.requests_to("/api/auth/me");
    assert_eq!(me[0].authorization.as_deref(), Some("Bearer A1"));

    let login = backend.state.requests_to("/api/auth/login");
    assert_eq!(login[0].authorization, None);
}

#[tokio::test]
async fn bad_credentials_do_not_touch_the_session() {
    let backend = MockBackend::start().await;
    let (access, refresh) = backend.state.issue();
    let (client, store) = backend.client_with_session(&access, &refresh);

    let error = client.login("user@example.com", "wrong").await.unwrap_err();
    assert_eq!(error.kind, ErrorKind::Authentication);
    assert_eq!(error.message.as_deref(), Some("Incorrect identifier or password"));

    assert_eq!(backend.state.refresh_calls(), 0);
    assert_eq!(store.access_token().as_deref(), Some("A1"));
}

#[tokio::test]
async fn expired_token_is_refreshed_and_request_replayed() {
    let backend = MockBackend::start().await;
    let (access, refresh) = backend.state.issue();
    backend.state.expire_access(&access);

    let (client, store) = backend.client_with_session(&access, &refresh);
    let (expired, observer) = expiry_log();
    let client = client.with_observer(observer);

    let events = client.list_events(&EventQuery::all()).await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].title, "Kerja Bakti");

    assert_eq!(backend.state.refresh_calls(), 1);
    assert_eq!(store.access_token().as_deref(), Some("A2"));
    assert_eq!(store.refresh_token().as_deref(), Some("R2"));

    let sent: Vec<_> = backend
        .state
        .requests_to("/api/events")
        .into_iter()
        .map(|request| request.authorization)
        .collect();
    assert_eq!(
        sent,
        vec![Some("Bearer A1".to_owned()), Some("Bearer A2".to_owned())]
    );

    let refresh_requests = backend.state.requests_to("/api/auth/refresh");
    assert_eq!(refresh_requests.len(), 1);
    assert_eq!(refresh_requests[0].authorization, None);
    assert!(expired.lock().unwrap().is_empty());
}

#[tokio::test]
async fn failed_refresh_clears_session_and_notifies() {
    let backend = MockBackend::start().await;
    let (client, store) = backend.client_with_session("stale", "unknown");
    let (expired, observer) = expiry_log();
    let client = client.with_observer(observer);

    let error = client.me().await.unwrap_err();
    assert_eq!(error.kind, ErrorKind::Authentication);
    assert_eq!(error.status, Some(401));
    assert!(error.is_session_expired());
    assert!(std::error::Error::source(&error).is_some());

    assert_eq!(backend.state.refresh_calls(), 1);
    assert_eq!(backend.state.requests_to("/api/auth/me").len(), 1);
    assert!(store.access_token().is_none());
    assert!(store.refresh_token().is_none());
    assert_eq!(*expired.lock().unwrap(), vec![ExpiryReason::RefreshFailed]);
}

#[tokio::test]
async fn network_failure_is_not_retried_and_keeps_the_session() {
    let store = Arc::new(MemorySessionStore::new());
    store.save("A1", "R1").unwrap();
    let (expired, observer) = expiry_log();
    let client = ApiClient::new(
        ClientConfig::new(common::closed_url().await).with_timeout(5),
        store.clone(),
    )
    .unwrap()
    .with_observer(observer);

    let error = client.me().await.unwrap_err();
    assert_eq!(error.kind, ErrorKind::NetworkError);
    assert_eq!(error.status, None);

    assert_eq!(store.access_token().as_deref(), Some("A1"));
    assert_eq!(store.refresh_token().as_deref(), Some("R1"));
    assert!(expired.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unreachable_refresh_counts_as_refresh_failure() {
    let store = Arc::new(MemorySessionStore::new());
    store.save("A1", "R1").unwrap();
    let (expired, observer) = expiry_log();
    let client = ApiClient::new(
        ClientConfig::new(common::unauthorized_once_url().await).with_timeout(5),
        store.clone(),
    )
    .unwrap()
    .with_observer(observer);

    let error = client.me().await.unwrap_err();
    assert_eq!(error.kind, ErrorKind::Authentication);
    assert_eq!(error.status, Some(401));
    assert!(std::error::Error::source(&error).is_some());

    assert!(store.access_token().is_none());
    assert!(store.refresh_token().is_none());
    assert_eq!(*expired.lock().unwrap(), vec![ExpiryReason::RefreshFailed]);
}

#[tokio::test]
async fn missing_refresh_token_expires_without_refresh_call() {
    let backend = MockBackend::start().await;
    let store = Arc::new(MemorySessionStore::new());
    let (expired, observer) = expiry_log();
    let client = backend.client(store.clone()).with_observer(observer);

    let error = client.me().await.unwrap_err();
    assert_eq!(error.kind, ErrorKind::Authentication);

    assert_eq!(backend.state.refresh_calls(), 0);
    assert!(store.credentials().is_empty());
    assert_eq!(
        *expired.lock().unwrap(),
        vec![ExpiryReason::MissingRefreshToken]
    );
}

#[tokio::test]
async fn rejected_retry_is_not_refreshed_again() {
    let backend = MockBackend::start().await;
    let (access, refresh) = backend.state.issue();
    let (client, store) = backend.client_with_session(&access, &refresh);
    let (expired, observer) = expiry_log();
    let client = client.with_observer(observer);

    let error = client
        .send(&ApiRequest::get("always-unauthorized"))
        .await
        .unwrap_err();
    assert_eq!(error.kind, ErrorKind::Authentication);
    assert_eq!(error.message.as_deref(), Some("Token revoked"));

    assert_eq!(backend.state.refresh_calls(), 1);
    assert_eq!(backend.state.requests_to("/api/always-unauthorized").len(), 2);
    assert!(store.access_token().is_none());
    assert_eq!(*expired.lock().unwrap(), vec![ExpiryReason::RetryRejected]);
}

#[tokio::test]
async fn each_request_gets_its_own_refresh_cycle() {
    let backend = MockBackend::start().await;
    let (access, refresh) = backend.state.issue();
    backend.state.expire_access(&access);
    let (client, store) = backend.client_with_session(&access, &refresh);

    client.me().await.unwrap();
    assert_eq!(store.access_token().as_deref(), Some("A2"));

    backend.state.expire_access("A2");
    client.me().await.unwrap();

    assert_eq!(backend.state.refresh_calls(), 2);
    assert_eq!(store.access_token().as_deref(), Some("A3"));
    assert_eq!(store.refresh_token().as_deref(), Some("R3"));
}

#[tokio::test]
async fn explicit_refresh_rotates_the_pair() {
    let backend = MockBackend::start().await;
    let (access, refresh) = backend.state.issue();
    let (client, store) = backend.client_with_session(&access, &refresh);

    let first = client.refresh_session().await.unwrap();
    let second = client.refresh_session().await.unwrap();

    assert_ne!(first, second);
    assert_eq!(first.refresh_token, "R2");
    assert_eq!(second.refresh_token, "R3");
    assert_eq!(store.refresh_token().as_deref(), Some("R3"));

    let sent: Vec<_> = backend.state.requests_to("/api/auth/refresh");
    assert_eq!(sent.len(), 2);
}

#[tokio::test]
async fn explicit_refresh_failure_keeps_the_session() {
    let backend = MockBackend::start().await;
    let (client, store) = backend.client_with_session("A9", "R9");

    let error = client.refresh_session().await.unwrap_err();
    assert_eq!(error.kind, ErrorKind::Authentication);
    assert_eq!(store.access_token().as_deref(), Some("A9"));
}

#[tokio::test]
async fn concurrent_unauthorized_requests_share_one_refresh() {
    let backend = MockBackend::start().await;
    let (access, refresh) = backend.state.issue();
    backend.state.expire_access(&access);
    backend.state.delay_refresh(Duration::from_millis(100));

    let (client, store) = backend.client_with_session(&access, &refresh);

    let tasks: Vec<_> = (0..5)
        .map(|_| {
            let client = client.clone();
            tokio::spawn(async move { client.me().await })
        })
        .collect();

    for task in tasks {
        task.await.unwrap().unwrap();
    }

    assert_eq!(backend.state.refresh_calls(), 1);
    assert_eq!(store.access_token().as_deref(), Some("A2"));

    let replays = backend
        .state
        .requests_to("/api/auth/me")
        .into_iter()
        .filter(|request| request.authorization.as_deref() == Some("Bearer A2"))
        .count();
    assert_eq!(replays, 5);
}

#[tokio::test]
async fn logout_forgets_the_session() {
    let backend = MockBackend::start().await;
    let (access, refresh) = backend.state.issue();
    let (client, store) = backend.client_with_session(&access, &refresh);

    AuthApi::logout(&client).await.unwrap();
    assert!(store.credentials().is_empty());
    assert!(!client.is_authenticated());
    assert!(backend.state.requests().is_empty());
}
