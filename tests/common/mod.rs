//! Shared fixtures for the integration suites: routers wired like a host
//! application would wire them, a recording logger, and a store double that
//! fails every operation.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    Json, Router,
    body::Body,
    http::{Request, header},
    middleware,
    response::Response,
    routing::{get, post},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use session_guard::{
    GuardLogger, GuardResult, SessionConfig, SessionGuard, cookie_duration_ms, session_layer,
    validate_session,
};
use tower::ServiceExt;
use tower_sessions::{
    Session, SessionStore,
    cookie::Cookie,
    session::{Id, Record},
    session_store,
};

pub fn test_config() -> SessionConfig {
    SessionConfig {
        secret: "integration-test-secret".to_string(),
        cookie_domain: "localhost".to_string(),
        cookie_duration_ms: cookie_duration_ms(1),
        secure: false,
    }
}

/// Router under test plus the downstream-invocation counter.
pub struct TestApp {
    pub router: Router,
    pub hits: Arc<AtomicUsize>,
}

impl TestApp {
    pub fn downstream_hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn login(session: Session) -> GuardResult<&'static str> {
    session.insert("user_id", "alice").await?;
    Ok("logged in")
}

async fn whoami(session: Session) -> GuardResult<Json<Value>> {
    let user_id: Option<String> = session.get("user_id").await?;
    Ok(Json(json!({ "user_id": user_id })))
}

fn protected_routes(guard: SessionGuard, hits: Arc<AtomicUsize>) -> Router {
    Router::new()
        .route(
            "/protected",
            get(move || {
                let hits = hits.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    "granted"
                }
            }),
        )
        .route_layer(middleware::from_fn_with_state(guard, validate_session))
}

/// Full host application: login and whoami routes, a guarded route, and the
/// session layer in front of everything.
pub fn app_with_store<S>(guard: SessionGuard, config: &SessionConfig, store: S) -> TestApp
where
    S: SessionStore + Clone,
{
    let hits = Arc::new(AtomicUsize::new(0));

    let router = Router::new()
        .route("/login", post(login))
        .route("/whoami", get(whoami))
        .merge(protected_routes(guard, hits.clone()))
        .layer(session_layer(config, store));

    TestApp { router, hits }
}

/// Misconfigured host: the guarded route without any session layer.
pub fn app_without_session_layer(guard: SessionGuard) -> TestApp {
    let hits = Arc::new(AtomicUsize::new(0));
    let router = protected_routes(guard, hits.clone());
    TestApp { router, hits }
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_request_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

pub fn post_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn send(router: &Router, request: Request<Body>) -> Response {
    router.clone().oneshot(request).await.unwrap()
}

/// Establishes a session via the login route and returns the session cookie.
pub async fn establish_session(router: &Router) -> Cookie<'static> {
    let response = send(router, post_request("/login")).await;
    assert!(response.status().is_success(), "login must succeed");
    session_cookie(&response)
}

pub fn session_cookie(response: &Response) -> Cookie<'static> {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("response carries a set-cookie header")
        .to_str()
        .expect("set-cookie header is valid utf-8");
    Cookie::parse(set_cookie)
        .expect("set-cookie parses as a cookie")
        .into_owned()
}

/// Cookie header value (`name=value`) for a follow-up request.
pub fn cookie_pair(cookie: &Cookie<'_>) -> String {
    format!("{}={}", cookie.name(), cookie.value())
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("body is valid json")
}

/// Polls the whoami route until the session record behind `cookie` is gone.
///
/// Destruction runs detached from the rejection response, so observing it
/// needs a small grace period.
pub async fn session_destroyed(router: &Router, cookie: &str) -> bool {
    for _ in 0..40 {
        let response = send(router, get_request_with_cookie("/whoami", cookie)).await;
        if body_json(response).await["user_id"].is_null() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    false
}

/// Polls a condition that a detached task will eventually make true.
pub async fn eventually(mut condition: impl FnMut() -> bool) -> bool {
    for _ in 0..40 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    false
}

/// Logger that records every message it receives.
#[derive(Clone, Default)]
pub struct RecordingLogger {
    infos: Arc<Mutex<Vec<String>>>,
    errors: Arc<Mutex<Vec<String>>>,
}

impl RecordingLogger {
    pub fn infos(&self) -> Vec<String> {
        self.infos.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl GuardLogger for RecordingLogger {
    fn info(&self, message: &str) {
        self.infos.lock().unwrap().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

/// Session store whose every operation fails, for fail-closed tests.
#[derive(Clone, Debug, Default)]
pub struct FailingStore;

#[async_trait]
impl SessionStore for FailingStore {
    async fn create(&self, _record: &mut Record) -> session_store::Result<()> {
        Err(session_store::Error::Backend("store offline".to_string()))
    }

    async fn save(&self, _record: &Record) -> session_store::Result<()> {
        Err(session_store::Error::Backend("store offline".to_string()))
    }

    async fn load(&self, _id: &Id) -> session_store::Result<Option<Record>> {
        Err(session_store::Error::Backend("store offline".to_string()))
    }

    async fn delete(&self, _id: &Id) -> session_store::Result<()> {
        Err(session_store::Error::Backend("store offline".to_string()))
    }
}
