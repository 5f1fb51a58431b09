#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;
use tourbook::account::store::MemoryStore;
use tourbook::config::AuthConfig;
use tourbook::notify::ResetNotifier;
use tourbook::prelude::*;
use tourbook::web::{AppState, router};

/// Captures every reset message instead of sending it, so tests can read
/// the plaintext token the way a user would from their inbox.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn last_token(&self) -> String {
        self.sent.lock().unwrap().last().unwrap().1.clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl ResetNotifier for RecordingNotifier {
    fn send_password_reset(&self, email: &str, token: &str) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((email.to_string(), token.to_string()));
        Ok(())
    }
}

pub struct FailingNotifier;

impl ResetNotifier for FailingNotifier {
    fn send_password_reset(&self, _email: &str, _token: &str) -> Result<()> {
        Err(Error::Generic(String::from("smtp unreachable")))
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub notifier: Arc<RecordingNotifier>,
}

pub fn test_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: String::from("integration-test-secret"),
        token_ttl_minutes: 60,
        reset_window_minutes: 10,
        cookie_secure: false,
    }
}

pub fn spawn_app() -> TestApp {
    spawn_app_with(test_config())
}

pub fn spawn_app_with(config: AuthConfig) -> TestApp {
    let store = Arc::new(MemoryStore::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let router = router(AppState::new(config, store.clone(), notifier.clone()));
    TestApp {
        router,
        store,
        notifier,
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub json: Value,
    pub set_cookies: Vec<String>,
}

impl TestResponse {
    pub fn session_cookie(&self) -> Option<&String> {
        self.set_cookies.iter().find(|c| c.starts_with("jwt="))
    }
}

pub async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    bearer: Option<&str>,
    cookie: Option<&str>,
    body: Option<Value>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie.to_string());
    }
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let set_cookies = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    TestResponse {
        status,
        json,
        set_cookies,
    }
}

pub fn signup_body(name: &str, email: &str, password: &str) -> Value {
    serde_json::json!({
        "name": name,
        "email": email,
        "password": password,
        "password_confirm": password,
    })
}

pub async fn signup(app: &TestApp, email: &str, password: &str) -> TestResponse {
    send(
        &app.router,
        "POST",
        "/api/v1/accounts/signup",
        None,
        None,
        Some(signup_body("Test Account", email, password)),
    )
    .await
}
