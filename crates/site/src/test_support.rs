//! Shared fixtures for unit tests: a stub auth backend on an ephemeral port.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use url::Url;

use crate::api::ApiClient;
use crate::auth::{RegisterForm, RegistrationProfile};
use crate::config::{ApiConfig, SiteConfig};

/// The only password the stub accepts.
pub const VALID_PASSWORD: &str = "correct-horse";

/// A running stub backend.
///
/// - `POST /api/auth/login`: `VALID_PASSWORD` signs in as `tok-<email>`;
///   `down@...` answers 500 with no message; anything else answers 401.
/// - `POST /api/auth/register`: `taken@...` answers 409; `locked@...` answers
///   401; anything else signs in.
/// - `GET /api/auth/me`: `tok-<email>` is valid; `boom` answers 500; anything
///   else (including `expired`) answers 401.
pub struct StubBackend {
    pub base_url: Url,
    me_calls: Arc<AtomicUsize>,
}

impl StubBackend {
    pub async fn spawn() -> Self {
        let me_calls = Arc::new(AtomicUsize::new(0));

        let app = Router::new()
            .route("/api/auth/login", post(login))
            .route("/api/auth/register", post(register))
            .route("/api/auth/me", get(me))
            .with_state(Arc::clone(&me_calls));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: Url::parse(&format!("http://{addr}/api")).unwrap(),
            me_calls,
        }
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(&ApiConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    pub fn config(&self) -> SiteConfig {
        SiteConfig::local(self.base_url.clone())
    }

    pub fn me_calls(&self) -> usize {
        self.me_calls.load(Ordering::SeqCst)
    }
}

/// A valid registration for `email`.
pub fn registration(email: &str) -> RegistrationProfile {
    RegisterForm {
        first_name: "Asha".to_string(),
        last_name: "Verma".to_string(),
        email: email.to_string(),
        password: VALID_PASSWORD.to_string(),
        contact: "9876543210".to_string(),
        services: vec!["pricing-automation".to_string()],
        terms: true,
    }
    .validate()
    .unwrap()
}

fn user(email: &str) -> Value {
    json!({ "firstName": "Asha", "lastName": "Verma", "email": email, "_id": "u-1" })
}

async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let email = body["email"].as_str().unwrap_or_default();
    if email.starts_with("down@") {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({})));
    }
    if body["password"] == VALID_PASSWORD {
        (
            StatusCode::OK,
            Json(json!({ "token": format!("tok-{email}"), "user": user(email) })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid email or password" })),
        )
    }
}

async fn register(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let email = body["email"].as_str().unwrap_or_default();
    if email.starts_with("taken@") {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "message": "User already exists" })),
        );
    }
    if email.starts_with("locked@") {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Account locked" })),
        );
    }
    (
        StatusCode::CREATED,
        Json(json!({ "token": format!("tok-{email}"), "user": user(email) })),
    )
}

async fn me(
    State(calls): State<Arc<AtomicUsize>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    calls.fetch_add(1, Ordering::SeqCst);

    let token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or_default();

    if token == "boom" {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({})));
    }
    if let Some(email) = token.strip_prefix("tok-") {
        return (StatusCode::OK, Json(json!({ "user": user(email) })));
    }
    let message = if token == "expired" { "Token expired" } else { "Not authorized" };
    (StatusCode::UNAUTHORIZED, Json(json!({ "message": message })))
}
