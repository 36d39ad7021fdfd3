// system-tests/tests/helpers/stub_api.rs
// ============================================================================
// Module: Stub Analytical API
// Description: Minimal multi-tenant analytical API stub for system-tests.
// Purpose: Exercise login, paging, and search flows over real HTTP.
// Dependencies: axum, serde, serde_json, tokio
// ============================================================================

//! ## Overview
//! The stub mimics the parts of the analytical API the conformance kit
//! exercises: password login issuing sequence-numbered bearer tokens, a
//! paged dimension-elements listing, and an element search endpoint
//! understanding simple id filters. Entities are rendered with numeric
//! identifiers and float-typed populations so clients must normalize
//! representation, not echo it.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::net::TcpListener as StdTcpListener;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::thread;
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::extract::Query;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::routing::get;
use axum::routing::post;
use serde::Deserialize;
use serde_json::Value;
use serde_json::json;
use tokio::runtime::Builder;
use tokio::sync::oneshot;
use tokio::time::sleep;

/// Protocol version the stub requires in `X-API-VERSION`.
pub const STUB_API_VERSION: &str = "2";

/// Credentials the stub accepts, as `(role, username, password)`.
pub const STUB_CREDENTIALS: &[(&str, &str, &str)] = &[
    ("admin", "conformance-admin", "admin-secret"),
    ("reader", "conformance-reader", "reader-secret"),
];

/// Shared state behind the stub routes.
struct StubState {
    /// Login attempts observed, successful or not.
    login_hits: Arc<AtomicUsize>,
    /// Artificial login latency, used to widen singleflight race windows.
    login_delay: Duration,
    /// Seeded dimension elements, order significant.
    cities: Vec<Value>,
}

/// Handle for the stub analytical API server.
pub struct StubApiHandle {
    base_url: String,
    addr: SocketAddr,
    login_hits: Arc<AtomicUsize>,
    shutdown: Option<oneshot::Sender<()>>,
    join: Option<thread::JoinHandle<()>>,
}

impl StubApiHandle {
    /// Returns the stub base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the stub socket address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Returns the number of login attempts observed so far.
    pub fn login_hits(&self) -> usize {
        self.login_hits.load(Ordering::SeqCst)
    }
}

impl Drop for StubApiHandle {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

/// Spawns the stub API without artificial login latency.
pub async fn spawn_stub_api() -> Result<StubApiHandle, String> {
    spawn_stub_api_with_login_delay(Duration::from_millis(0)).await
}

/// Spawns the stub API with a login delay.
#[allow(clippy::unused_async, reason = "Async signature keeps helper API consistent in tests.")]
pub async fn spawn_stub_api_with_login_delay(
    login_delay: Duration,
) -> Result<StubApiHandle, String> {
    let listener = StdTcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("stub api bind failed: {err}"))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("stub api listener nonblocking failed: {err}"))?;
    let addr = listener.local_addr().map_err(|err| format!("stub api local addr failed: {err}"))?;
    let base_url = format!("http://{addr}");

    let login_hits = Arc::new(AtomicUsize::new(0));
    let state = Arc::new(StubState {
        login_hits: Arc::clone(&login_hits),
        login_delay,
        cities: seed_cities(),
    });
    let app = Router::new()
        .route("/api/login", post(handle_login))
        .route("/api/dimensions/city/elements", get(handle_elements))
        .route("/api/dimensions/city/elements/search", post(handle_search))
        .with_state(state);
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let join = thread::spawn(move || {
        let runtime = match Builder::new_current_thread().enable_all().build() {
            Ok(runtime) => runtime,
            Err(error) => {
                let _ = error;
                return;
            }
        };
        runtime.block_on(async move {
            let listener = match tokio::net::TcpListener::from_std(listener) {
                Ok(listener) => listener,
                Err(error) => {
                    let _ = error;
                    return;
                }
            };
            let server = axum::serve(listener, app).with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            });
            let _ = server.await;
        });
    });
    Ok(StubApiHandle {
        base_url,
        addr,
        login_hits,
        shutdown: Some(shutdown_tx),
        join: Some(join),
    })
}

/// Seeds the sixteen dimension elements the suites page over.
///
/// Moscow (id 4) carries a float-typed population and a founding date so
/// verification must bridge representations.
fn seed_cities() -> Vec<Value> {
    let names = [
        "Amsterdam",
        "Berlin",
        "Cairo",
        "Moscow",
        "Delhi",
        "Helsinki",
        "Jakarta",
        "Kyiv",
        "Lima",
        "Madrid",
        "Nairobi",
        "Oslo",
        "Paris",
        "Quito",
        "Rome",
        "Tokyo",
    ];
    names
        .iter()
        .enumerate()
        .map(|(position, name)| {
            let id = position + 1;
            if *name == "Moscow" {
                json!({
                    "id": id,
                    "name": name,
                    "path": ["Europe", "Russia"],
                    "attributes": [
                        {"attributeId": "population", "value": 4_000_000.0},
                        {"attributeId": "founded", "value": "1147-04-04"}
                    ]
                })
            } else {
                json!({
                    "id": id,
                    "name": name,
                    "attributes": [
                        {"attributeId": "population", "value": (id * 100_000)}
                    ]
                })
            }
        })
        .collect()
}

/// Login request body.
#[derive(Debug, Deserialize)]
struct LoginRequest {
    /// Login user name.
    username: String,
    /// Login password.
    password: String,
}

/// Issues a sequence-numbered bearer token for known credentials.
async fn handle_login(
    State(state): State<Arc<StubState>>,
    Json(request): Json<LoginRequest>,
) -> (StatusCode, Json<Value>) {
    let hit = state.login_hits.fetch_add(1, Ordering::SeqCst) + 1;
    if state.login_delay > Duration::from_millis(0) {
        sleep(state.login_delay).await;
    }
    let known = STUB_CREDENTIALS
        .iter()
        .any(|(_, username, password)| *username == request.username && *password == request.password);
    if !known {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "invalid credentials"})));
    }
    let token = format!("token-{}-{hit}", request.username);
    (StatusCode::OK, Json(json!({"token": token})))
}

/// Rejects requests without a stub-issued bearer token or version header.
fn authorize(headers: &HeaderMap) -> Result<(), (StatusCode, Json<Value>)> {
    let version = headers.get("X-API-VERSION").and_then(|value| value.to_str().ok());
    if version != Some(STUB_API_VERSION) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "missing or unsupported X-API-VERSION"})),
        ));
    }
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));
    match token {
        Some(value) if value.starts_with("token-") => Ok(()),
        _ => Err((StatusCode::UNAUTHORIZED, Json(json!({"error": "missing or invalid token"})))),
    }
}

/// Lists dimension elements with `limit`/`skip`/`getAll` paging.
async fn handle_elements(
    State(state): State<Arc<StubState>>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    if let Err(rejection) = authorize(&headers) {
        return rejection;
    }
    let skip = match parse_count(&query, "skip") {
        Ok(value) => value.unwrap_or(0),
        Err(rejection) => return rejection,
    };
    let limit = match parse_count(&query, "limit") {
        Ok(value) => value,
        Err(rejection) => return rejection,
    };
    let get_all = query.get("getAll").map(String::as_str) == Some("true");

    let remaining = state.cities.iter().skip(skip);
    let entities: Vec<Value> = if get_all {
        remaining.cloned().collect()
    } else {
        match limit {
            Some(limit) => remaining.take(limit).cloned().collect(),
            None => remaining.cloned().collect(),
        }
    };
    (StatusCode::OK, Json(json!({"entities": entities})))
}

/// Parses an optional non-negative count query parameter.
fn parse_count(
    query: &HashMap<String, String>,
    name: &str,
) -> Result<Option<usize>, (StatusCode, Json<Value>)> {
    match query.get(name) {
        None => Ok(None),
        Some(raw) => raw.parse::<usize>().map(Some).map_err(|_| {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": format!("{name} must be a non-negative integer")})),
            )
        }),
    }
}

/// Searches dimension elements by a simple id-equals filter.
async fn handle_search(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Json(filter): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if let Err(rejection) = authorize(&headers) {
        return rejection;
    }
    let kind = filter.get("type").and_then(Value::as_str);
    let condition = filter.get("condition").and_then(Value::as_str);
    let Some(wanted) = filter.get("value").map(identifier_text) else {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "missing filter value"})));
    };
    if kind != Some("id") || condition != Some("equals") {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "unsupported filter"})));
    }
    let entities: Vec<Value> = state
        .cities
        .iter()
        .filter(|city| city.get("id").map(identifier_text) == Some(wanted.clone()))
        .cloned()
        .collect();
    (StatusCode::OK, Json(json!({"entities": entities})))
}

/// Stringifies a number-or-string member for comparison.
fn identifier_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
