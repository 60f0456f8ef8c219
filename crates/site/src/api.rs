//! HTTP client for the Spaceway auth backend.
//!
//! Every backend call goes through [`ApiClient`], which:
//!
//! - attaches `Authorization: Bearer <token>` when the visitor's storage holds a token
//! - logs each request and response at debug level
//! - on `401`, clears `token` and `user` from storage before failing with
//!   [`ApiError::Unauthorized`]
//! - on any other failure, queues an error notice for the visitor
//!
//! No request is retried.

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::auth::notice::{Notice, push_notice};
use crate::auth::session::UserProfile;
use crate::auth::storage::{SessionStorage, StorageError, keys};
use crate::auth::{Credentials, RegistrationProfile};
use crate::config::ApiConfig;

/// Shown when the backend gives no message of its own.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred. Please try again.";

/// Errors from backend calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend rejected the token; storage has already been cleared.
    #[error("unauthorized")]
    Unauthorized { message: Option<String> },

    /// Any other non-2xx response.
    #[error("backend returned {status}: {}", .message.as_deref().unwrap_or(GENERIC_ERROR_MESSAGE))]
    Status {
        status: StatusCode,
        message: Option<String>,
    },

    /// Connection failure or timeout.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// A 2xx response whose body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(#[source] reqwest::Error),

    /// Reading or clearing visitor storage failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// The message the backend sent with the failure, if any.
    #[must_use]
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { message } | Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// Successful login or registration response.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthPayload {
    pub token: String,
    #[serde(default)]
    pub user: UserProfile,
}

#[derive(Debug, Deserialize)]
struct MeResponse {
    #[serde(default)]
    user: UserProfile,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Client for the auth backend.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] if the underlying HTTP client cannot be
    /// constructed (e.g. TLS backend initialization fails).
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(ApiError::Network)?;

        Ok(Self {
            http,
            base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
        })
    }

    /// `POST /auth/login`.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn login(
        &self,
        storage: &dyn SessionStorage,
        credentials: &Credentials,
    ) -> Result<AuthPayload, ApiError> {
        let builder = self.http.post(self.endpoint("auth/login")).json(credentials);
        self.send(storage, builder).await
    }

    /// `POST /auth/register`.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn register(
        &self,
        storage: &dyn SessionStorage,
        profile: &RegistrationProfile,
    ) -> Result<AuthPayload, ApiError> {
        let builder = self.http.post(self.endpoint("auth/register")).json(profile);
        self.send(storage, builder).await
    }

    /// `GET /auth/me`: the profile behind the stored token.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn me(&self, storage: &dyn SessionStorage) -> Result<UserProfile, ApiError> {
        let builder = self.http.request(Method::GET, self.endpoint("auth/me"));
        let body: MeResponse = self.send(storage, builder).await?;
        Ok(body.user)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        storage: &dyn SessionStorage,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let mut request = builder.build().map_err(ApiError::Network)?;

        if let Some(token) = storage.get_item(keys::TOKEN).await? {
            if token.is_empty() {
                // Nothing to send
            } else if let Ok(value) = HeaderValue::from_str(&format!("Bearer {token}")) {
                request.headers_mut().insert(AUTHORIZATION, value);
            } else {
                tracing::warn!("Stored token is not a valid header value; sending without it");
            }
        }

        tracing::debug!(method = %request.method(), url = %request.url(), "Request");

        let response = match self.http.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Backend unreachable");
                push_notice(storage, Notice::error(GENERIC_ERROR_MESSAGE)).await?;
                return Err(ApiError::Network(e));
            }
        };

        let status = response.status();
        tracing::debug!(status = %status, url = %response.url(), "Response");

        if status.is_success() {
            return response.json::<T>().await.map_err(|e| {
                tracing::warn!(error = %e, "Backend response did not match expected shape");
                ApiError::Decode(e)
            });
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .filter(|m| !m.trim().is_empty());

        if status == StatusCode::UNAUTHORIZED {
            storage.remove_item(keys::TOKEN).await?;
            storage.remove_item(keys::USER).await?;
            return Err(ApiError::Unauthorized { message });
        }

        push_notice(
            storage,
            Notice::error(message.as_deref().unwrap_or(GENERIC_ERROR_MESSAGE)),
        )
        .await?;
        Err(ApiError::Status { status, message })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::auth::LoginForm;
    use crate::auth::notice::take_notices;
    use crate::auth::storage::MemoryStorage;
    use crate::test_support::{StubBackend, VALID_PASSWORD};

    fn credentials(email: &str, password: &str) -> Credentials {
        LoginForm {
            email: email.to_string(),
            password: password.to_string(),
        }
        .validate()
        .unwrap()
    }

    #[tokio::test]
    async fn test_endpoint_keeps_base_path() {
        let backend = StubBackend::spawn().await;
        let client = backend.client();
        assert!(client.endpoint("/auth/me").ends_with("/api/auth/me"));
        assert!(client.endpoint("auth/me").ends_with("/api/auth/me"));
    }

    #[tokio::test]
    async fn test_login_success() {
        let backend = StubBackend::spawn().await;
        let storage = MemoryStorage::new();

        let payload = backend
            .client()
            .login(&storage, &credentials("asha@shop.in", VALID_PASSWORD))
            .await
            .unwrap();

        assert_eq!(payload.token, "tok-asha@shop.in");
        assert_eq!(payload.user.first_name.as_deref(), Some("Asha"));
    }

    #[tokio::test]
    async fn test_me_sends_bearer_token() {
        let backend = StubBackend::spawn().await;
        let storage = MemoryStorage::new();
        storage.set_item(keys::TOKEN, "tok-asha@shop.in").await.unwrap();

        let user = backend.client().me(&storage).await.unwrap();
        assert_eq!(user.email.as_deref(), Some("asha@shop.in"));
    }

    #[tokio::test]
    async fn test_unauthorized_clears_storage() {
        let backend = StubBackend::spawn().await;
        let storage = MemoryStorage::new();
        storage.set_item(keys::TOKEN, "expired").await.unwrap();
        storage.set_item(keys::USER, r#"{"firstName":"Asha"}"#).await.unwrap();
        storage.set_item(keys::THEME, "dark").await.unwrap();

        let err = backend.client().me(&storage).await.unwrap_err();

        assert!(matches!(err, ApiError::Unauthorized { .. }));
        assert_eq!(err.backend_message(), Some("Token expired"));
        assert_eq!(storage.get_item(keys::TOKEN).await.unwrap(), None);
        assert_eq!(storage.get_item(keys::USER).await.unwrap(), None);
        // Unrelated keys survive
        assert_eq!(
            storage.get_item(keys::THEME).await.unwrap().as_deref(),
            Some("dark")
        );
        // No toast for 401
        assert!(take_notices(&storage).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_server_error_queues_generic_notice() {
        let backend = StubBackend::spawn().await;
        let storage = MemoryStorage::new();
        storage.set_item(keys::TOKEN, "boom").await.unwrap();

        let err = backend.client().me(&storage).await.unwrap_err();

        assert!(matches!(
            err,
            ApiError::Status { status, message: None } if status == StatusCode::INTERNAL_SERVER_ERROR
        ));
        assert_eq!(
            take_notices(&storage).await.unwrap(),
            vec![Notice::error(GENERIC_ERROR_MESSAGE)]
        );
        // Token is kept for non-401 failures
        assert!(storage.get_item(keys::TOKEN).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_backend_message_becomes_notice() {
        let backend = StubBackend::spawn().await;
        let storage = MemoryStorage::new();

        let profile = crate::test_support::registration("taken@shop.in");
        let err = backend.client().register(&storage, &profile).await.unwrap_err();

        assert_eq!(err.backend_message(), Some("User already exists"));
        assert_eq!(
            take_notices(&storage).await.unwrap(),
            vec![Notice::error("User already exists")]
        );
    }

    #[tokio::test]
    async fn test_network_error() {
        let config = ApiConfig {
            base_url: url::Url::parse("http://127.0.0.1:9/api").unwrap(),
            timeout: std::time::Duration::from_secs(2),
        };
        let client = ApiClient::new(&config).unwrap();
        let storage = MemoryStorage::new();

        let err = client.me(&storage).await.unwrap_err();

        assert!(matches!(err, ApiError::Network(_)));
        assert_eq!(err.backend_message(), None);
        assert_eq!(
            take_notices(&storage).await.unwrap(),
            vec![Notice::error(GENERIC_ERROR_MESSAGE)]
        );
    }
}
