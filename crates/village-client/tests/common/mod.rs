//! In-process mock of the village backend.
//!
//! Issues rotating `A{n}`/`R{n}` token pairs, rejects unknown bearer tokens
//! with `401` and records every request it receives.

#![allow(dead_code)]

use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Request, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use village_client::{ApiClient, ClientConfig, MemorySessionStore, SessionStore};

pub const USER_ID: &str = "c6a1d9b2-2222-4f0e-8e3d-5b9a7c1d0e32";
pub const EVENT_ID: &str = "7d0e3c4a-8a66-4b71-a0b5-2b0f0c8f4d11";

/// One request as seen by the mock backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
}

#[derive(Debug, Default)]
pub struct MockState {
    access_tokens: Mutex<HashSet<String>>,
    refresh_tokens: Mutex<HashSet<String>>,
    generation: AtomicUsize,
    refresh_calls: AtomicUsize,
    refresh_delay_ms: AtomicU64,
    requests: Mutex<Vec<Recorded>>,
}

impl MockState {
    /// Issues the next token pair and accepts both tokens.
    pub fn issue(&self) -> (String, String) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let access = format!("A{generation}");
        let refresh = format!("R{generation}");

        self.access_tokens.lock().unwrap().insert(access.clone());
        self.refresh_tokens.lock().unwrap().insert(refresh.clone());
        (access, refresh)
    }

    /// Stops accepting an access token, as if it expired.
    pub fn expire_access(&self, token: &str) {
        self.access_tokens.lock().unwrap().remove(token);
    }

    /// Slows down the refresh endpoint.
    pub fn delay_refresh(&self, delay: Duration) {
        self.refresh_delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    pub fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests received for `path` (e.g. `/api/events`), in order.
    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|request| request.path == path)
            .collect()
    }

    fn authorize(&self, headers: &HeaderMap) -> Result<(), Response> {
        let token = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        match token {
            Some(token) if self.access_tokens.lock().unwrap().contains(token) => Ok(()),
            _ => Err(reject(
                StatusCode::UNAUTHORIZED,
                json!("Could not validate credentials"),
            )),
        }
    }
}

/// A running mock backend.
pub struct MockBackend {
    pub addr: SocketAddr,
    pub state: Arc<MockState>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let app = router(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind listener");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });

        Self { addr, state }
    }

    /// Base URL of the mock API.
    pub fn url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// A client pointed at this backend using the given store.
    pub fn client(&self, store: Arc<dyn SessionStore>) -> ApiClient {
        ApiClient::new(ClientConfig::new(self.url()).with_timeout(5), store).expect("client")
    }

    /// A client whose store already holds `access`/`refresh`.
    pub fn client_with_session(
        &self,
        access: &str,
        refresh: &str,
    ) -> (ApiClient, Arc<MemorySessionStore>) {
        let store = Arc::new(MemorySessionStore::new());
        store.save(access, refresh).expect("save session");
        (self.client(store.clone()), store)
    }
}

/// Base URL of an address nothing listens on.
pub async fn closed_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    format!("http://{addr}/api")
}

/// Base URL of a server that answers one request with `401` and then stops
/// listening, so the follow-up refresh call cannot connect.
pub async fn unauthorized_once_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept connection");
        drop(listener);

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|window| window == b"\r\n\r\n") {
            match socket.read(&mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(read) => request.extend_from_slice(&buf[..read]),
            }
        }

        let body = r#"{"detail":"Token expired"}"#;
        let response = format!(
            "HTTP/1.1 401 Unauthorized\r\n\
             content-type: application/json\r\n\
             content-length: {}\r\n\
             connection: close\r\n\r\n{body}",
            body.len()
        );
        socket
            .write_all(response.as_bytes())
            .await
            .expect("write response");
        let _ = socket.shutdown().await;
    });

    format!("http://{addr}/api")
}

type Reply = Result<Json<Value>, Response>;

fn reject(status: StatusCode, detail: Value) -> Response {
    (status, Json(json!({ "detail": detail }))).into_response()
}

fn router(state: Arc<MockState>) -> Router {
    let api = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/auth/me", get(me))
        .route("/events", get(list_events).post(create_event))
        .route("/events/{id}", get(event_not_found))
        .route("/events/{id}/register", post(register))
        .route("/participants/{id}", delete(delete_participant))
        .route("/users", get(forbidden))
        .route("/announcements", get(list_announcements))
        .route("/attendance/report", get(attendance_report))
        .route("/attendance/reports/export", get(export_report))
        .route("/always-unauthorized", get(always_unauthorized));

    Router::new()
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(state.clone(), record))
        .with_state(state)
}

async fn record(State(state): State<Arc<MockState>>, request: Request, next: Next) -> Response {
    let recorded = Recorded {
        method: request.method().to_string(),
        path: request.uri().path().to_owned(),
        query: request.uri().query().map(str::to_owned),
        authorization: request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned),
    };
    state.requests.lock().unwrap().push(recorded);

    next.run(request).await
}

fn token_pair(access: String, refresh: String) -> Json<Value> {
    Json(json!({
        "access_token": access,
        "refresh_token": refresh,
        "token_type": "bearer",
    }))
}

fn user() -> Value {
    json!({
        "id": USER_ID,
        "email": "user@example.com",
        "phone": null,
        "full_name": "Warga Desa",
        "is_admin": false,
        "is_active": true,
        "created_at": "2025-01-01T00:00:00+00:00",
    })
}

fn event() -> Value {
    json!({
        "id": EVENT_ID,
        "title": "Kerja Bakti",
        "description": "Membersihkan saluran air",
        "location": "Balai Desa",
        "event_date": "2025-12-07T01:00:00+00:00",
        "created_at": "2025-11-01T08:30:00+00:00",
        "updated_at": "2025-11-01T08:30:00+00:00",
        "is_cancelled": false,
        "requires_registration": true,
        "recurrence_pattern": null,
    })
}

async fn login(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Reply {
    if body["identifier"] == "user@example.com" && body["password"] == "secret" {
        let (access, refresh) = state.issue();
        Ok(token_pair(access, refresh))
    } else {
        Err(reject(
            StatusCode::UNAUTHORIZED,
            json!("Incorrect identifier or password"),
        ))
    }
}

async fn refresh(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Reply {
    state.refresh_calls.fetch_add(1, Ordering::SeqCst);

    let delay = state.refresh_delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }

    let token = body["refresh_token"].as_str().unwrap_or_default();
    if !state.refresh_tokens.lock().unwrap().remove(token) {
        return Err(reject(
            StatusCode::UNAUTHORIZED,
            json!("Invalid refresh token"),
        ));
    }

    let (access, refresh) = state.issue();
    Ok(token_pair(access, refresh))
}

async fn me(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Reply {
    state.authorize(&headers)?;
    Ok(Json(user()))
}

async fn list_events(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Reply {
    state.authorize(&headers)?;
    Ok(Json(json!({ "success": true, "data": [event()] })))
}

async fn create_event(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Reply {
    state.authorize(&headers)?;
    Err(reject(
        StatusCode::UNPROCESSABLE_ENTITY,
        json!([
            { "loc": ["body", "title"], "msg": "Field required", "type": "missing" }
        ]),
    ))
}

async fn event_not_found(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(_id): Path<String>,
) -> Reply {
    state.authorize(&headers)?;
    Err(reject(
        StatusCode::NOT_FOUND,
        json!({ "code": "EVENT_NOT_FOUND", "message": "Event tidak ditemukan" }),
    ))
}

async fn register(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(_id): Path<String>,
) -> Reply {
    state.authorize(&headers)?;
    Ok(Json(json!({
        "success": true,
        "message": "Registered successfully",
        "slots_remaining": 4,
    })))
}

async fn delete_participant(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(_id): Path<String>,
) -> Reply {
    state.authorize(&headers)?;
    Ok(Json(Value::Null))
}

async fn forbidden(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Reply {
    state.authorize(&headers)?;
    Err(reject(
        StatusCode::FORBIDDEN,
        json!("Admin privileges required"),
    ))
}

async fn list_announcements() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": [{
            "id": "5f1d2c3b-4a59-4e8f-9b7a-1c2d3e4f5a6b",
            "title": "Rapat Warga",
            "body": "Rapat di balai desa pukul 19.00",
            "created_at": "2025-11-10T12:00:00+00:00",
            "updated_at": "2025-11-10T12:00:00+00:00",
        }],
    }))
}

async fn attendance_report(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Reply {
    state.authorize(&headers)?;
    Ok(Json(json!([
        { "participant_id": USER_ID, "attended_count": 3 }
    ])))
}

async fn export_report(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
) -> Result<Response, Response> {
    state.authorize(&headers)?;
    let csv = format!("participant_id,attended_count\n{USER_ID},3\n");
    Ok(([(header::CONTENT_TYPE, "text/csv")], csv).into_response())
}

async fn always_unauthorized() -> Response {
    reject(StatusCode::UNAUTHORIZED, json!("Token revoked"))
}
