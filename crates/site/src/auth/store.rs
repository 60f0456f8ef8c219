//! Auth state holder.
//!
//! One [`AuthStore`] is built per request over the visitor's storage. It owns
//! the state machine
//!
//! ```text
//! Uninitialized ──initialize──▶ Authenticated | Anonymous
//! Anonymous     ──login/register ok──▶ Authenticated
//! Authenticated ──logout / 401──▶ Anonymous
//! ```
//!
//! and publishes each new [`Session`] on a watch channel.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::watch;

use super::forms::{Credentials, RegistrationProfile};
use super::session::{Session, UserProfile};
use super::storage::{SessionStorage, StorageError, keys};
use crate::api::{ApiClient, ApiError, AuthPayload};

/// Fallback when the backend gives no reason for a failed login.
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed";
/// Fallback when the backend gives no reason for a failed registration.
pub const REGISTRATION_FAILED_MESSAGE: &str = "Registration failed";

const VALIDATION_CACHE_CAPACITY: u64 = 10_000;

/// Result of a login or registration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Success,
    Failure {
        message: String,
        /// The backend answered 401; storage has been cleared.
        unauthorized: bool,
    },
}

/// How [`AuthStore::initialize`] resolved the stored token.
#[derive(Debug, Clone)]
pub struct Initialized {
    pub session: Arc<Session>,
    /// A stored token failed validation; storage has been cleared.
    pub token_rejected: bool,
}

impl Initialized {
    fn resolved(session: Arc<Session>) -> Self {
        Self {
            session,
            token_rejected: false,
        }
    }

    fn rejected(session: Arc<Session>) -> Self {
        Self {
            session,
            token_rejected: true,
        }
    }
}

impl AuthOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Recently validated tokens and their profiles.
///
/// Shared across requests so that rendering the navigation bar on every page
/// does not cost a backend round-trip. A revoked token keeps working until
/// its entry expires. A zero TTL, the default, disables it.
#[derive(Clone)]
pub struct ValidationCache {
    inner: Option<Cache<String, UserProfile>>,
}

impl ValidationCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        let inner = (!ttl.is_zero()).then(|| {
            Cache::builder()
                .max_capacity(VALIDATION_CACHE_CAPACITY)
                .time_to_live(ttl)
                .build()
        });
        Self { inner }
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self { inner: None }
    }

    async fn get(&self, token: &str) -> Option<UserProfile> {
        self.inner.as_ref()?.get(token).await
    }

    async fn insert(&self, token: &str, user: UserProfile) {
        if let Some(cache) = &self.inner {
            cache.insert(token.to_owned(), user).await;
        }
    }

    async fn invalidate(&self, token: &str) {
        if let Some(cache) = &self.inner {
            cache.invalidate(token).await;
        }
    }
}

impl std::fmt::Debug for ValidationCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationCache")
            .field("enabled", &self.inner.is_some())
            .field(
                "entries",
                &self.inner.as_ref().map_or(0, |cache| cache.entry_count()),
            )
            .finish()
    }
}

/// Per-request auth state holder.
#[derive(Clone)]
pub struct AuthStore {
    storage: Arc<dyn SessionStorage>,
    api: ApiClient,
    cache: ValidationCache,
    state: Arc<watch::Sender<Arc<Session>>>,
}

impl AuthStore {
    /// Create a store in the uninitialized (`loading`) state.
    #[must_use]
    pub fn new(storage: Arc<dyn SessionStorage>, api: ApiClient, cache: ValidationCache) -> Self {
        let (state, _) = watch::channel(Arc::new(Session::pending()));
        Self {
            storage,
            api,
            cache,
            state: Arc::new(state),
        }
    }

    /// The current state.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Session> {
        self.state.borrow().clone()
    }

    /// Observe state transitions.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<Session>> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// The visitor's storage.
    #[must_use]
    pub fn storage(&self) -> &dyn SessionStorage {
        self.storage.as_ref()
    }

    /// Resolve the stored token into a session.
    ///
    /// Without a token the visitor is anonymous. With one, the token is
    /// checked against `/auth/me` (or the validation cache); any failure logs
    /// the visitor out and is reported as [`Initialized::token_rejected`] so
    /// the caller can send them to the login page.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing store fails.
    pub async fn initialize(&self) -> Result<Initialized, StorageError> {
        let token = self
            .storage
            .get_item(keys::TOKEN)
            .await?
            .filter(|t| !t.is_empty());

        let Some(token) = token else {
            return Ok(Initialized::resolved(self.publish(Session::anonymous())));
        };

        if let Some(user) = self.cache.get(&token).await {
            let session = Session::authenticated(SecretString::from(token), user);
            return Ok(Initialized::resolved(self.publish(session)));
        }

        match self.api.me(self.storage.as_ref()).await {
            Ok(user) if !user.is_empty() => {
                self.cache.insert(&token, user.clone()).await;
                let session = Session::authenticated(SecretString::from(token), user);
                Ok(Initialized::resolved(self.publish(session)))
            }
            Ok(_) => {
                tracing::warn!("Backend returned an empty profile; treating token as invalid");
                Ok(Initialized::rejected(self.logout().await?))
            }
            Err(ApiError::Storage(e)) => Err(e),
            Err(e) => {
                tracing::info!(error = %e, "Stored token rejected; logging out");
                Ok(Initialized::rejected(self.logout().await?))
            }
        }
    }

    /// Sign in with credentials.
    ///
    /// Backend failures are reported as [`AuthOutcome::Failure`] with the
    /// backend's message, or "Login failed" when it sent none.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] only if the backing store fails.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthOutcome, StorageError> {
        let result = self.api.login(self.storage.as_ref(), credentials).await;
        self.complete(result, LOGIN_FAILED_MESSAGE).await
    }

    /// Create an account and sign in.
    ///
    /// Failures fall back to "Registration failed".
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] only if the backing store fails.
    pub async fn register(
        &self,
        profile: &RegistrationProfile,
    ) -> Result<AuthOutcome, StorageError> {
        let result = self.api.register(self.storage.as_ref(), profile).await;
        self.complete(result, REGISTRATION_FAILED_MESSAGE).await
    }

    /// Forget the token and profile.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing store fails.
    pub async fn logout(&self) -> Result<Arc<Session>, StorageError> {
        let published = self.state.borrow().token.clone();
        if let Some(token) = published {
            self.cache.invalidate(token.expose_secret()).await;
        }
        if let Some(token) = self.storage.get_item(keys::TOKEN).await? {
            self.cache.invalidate(&token).await;
        }

        self.storage.remove_item(keys::TOKEN).await?;
        self.storage.remove_item(keys::USER).await?;
        Ok(self.publish(Session::anonymous()))
    }

    async fn complete(
        &self,
        result: Result<AuthPayload, ApiError>,
        fallback: &str,
    ) -> Result<AuthOutcome, StorageError> {
        let payload = match result {
            Ok(payload) if !payload.token.is_empty() && !payload.user.is_empty() => payload,
            Ok(_) => {
                tracing::warn!("Backend accepted credentials but sent no token or profile");
                return Ok(AuthOutcome::Failure {
                    message: fallback.to_string(),
                    unauthorized: false,
                });
            }
            Err(ApiError::Storage(e)) => return Err(e),
            Err(e) => {
                let unauthorized = matches!(e, ApiError::Unauthorized { .. });
                if unauthorized {
                    self.publish(Session::anonymous());
                }
                return Ok(AuthOutcome::Failure {
                    message: e.backend_message().unwrap_or(fallback).to_string(),
                    unauthorized,
                });
            }
        };

        let user_json = serde_json::to_string(&payload.user)?;
        self.storage.set_item(keys::TOKEN, &payload.token).await?;
        self.storage.set_item(keys::USER, &user_json).await?;
        self.cache.insert(&payload.token, payload.user.clone()).await;

        self.publish(Session::authenticated(
            SecretString::from(payload.token),
            payload.user,
        ));
        Ok(AuthOutcome::Success)
    }

    fn publish(&self, session: Session) -> Arc<Session> {
        let session = Arc::new(session);
        self.state.send_replace(Arc::clone(&session));
        session
    }
}

impl std::fmt::Debug for AuthStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthStore")
            .field("session", &self.snapshot())
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::auth::LoginForm;
    use crate::auth::storage::MemoryStorage;
    use crate::test_support::{StubBackend, VALID_PASSWORD, registration};

    fn store(backend: &StubBackend, storage: &MemoryStorage, cache: ValidationCache) -> AuthStore {
        AuthStore::new(Arc::new(storage.clone()), backend.client(), cache)
    }

    fn credentials(email: &str, password: &str) -> Credentials {
        LoginForm {
            email: email.to_string(),
            password: password.to_string(),
        }
        .validate()
        .unwrap()
    }

    #[tokio::test]
    async fn test_starts_loading() {
        let backend = StubBackend::spawn().await;
        let store = store(&backend, &MemoryStorage::new(), ValidationCache::disabled());
        assert!(store.snapshot().loading);
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn test_initialize_without_token_is_anonymous() {
        let backend = StubBackend::spawn().await;
        let store = store(&backend, &MemoryStorage::new(), ValidationCache::disabled());

        let resolved = store.initialize().await.unwrap();

        assert!(!resolved.token_rejected);
        assert!(!resolved.session.loading);
        assert!(!resolved.session.is_authenticated());
        assert_eq!(backend.me_calls(), 0);
    }

    #[tokio::test]
    async fn test_login_then_logout() {
        let backend = StubBackend::spawn().await;
        let storage = MemoryStorage::new();
        let store = store(&backend, &storage, ValidationCache::disabled());
        store.initialize().await.unwrap();

        let outcome = store
            .login(&credentials("asha@shop.in", VALID_PASSWORD))
            .await
            .unwrap();

        assert_eq!(outcome, AuthOutcome::Success);
        assert!(store.is_authenticated());
        assert_eq!(
            storage.get_item(keys::TOKEN).await.unwrap().as_deref(),
            Some("tok-asha@shop.in")
        );
        let stored_user: UserProfile =
            serde_json::from_str(&storage.get_item(keys::USER).await.unwrap().unwrap()).unwrap();
        assert_eq!(stored_user.first_name.as_deref(), Some("Asha"));

        store.logout().await.unwrap();

        assert!(!store.is_authenticated());
        assert_eq!(storage.get_item(keys::TOKEN).await.unwrap(), None);
        assert_eq!(storage.get_item(keys::USER).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_login_failure_uses_backend_message() {
        let backend = StubBackend::spawn().await;
        let storage = MemoryStorage::new();
        let store = store(&backend, &storage, ValidationCache::disabled());

        let outcome = store
            .login(&credentials("asha@shop.in", "wrong-password"))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            AuthOutcome::Failure {
                message: "Invalid email or password".to_string(),
                unauthorized: true,
            }
        );
        assert!(!store.is_authenticated());
        assert_eq!(storage.get_item(keys::TOKEN).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_login_failure_falls_back() {
        let backend = StubBackend::spawn().await;
        let store = store(&backend, &MemoryStorage::new(), ValidationCache::disabled());

        let outcome = store
            .login(&credentials("down@shop.in", VALID_PASSWORD))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            AuthOutcome::Failure {
                message: LOGIN_FAILED_MESSAGE.to_string(),
                unauthorized: false,
            }
        );
    }

    #[tokio::test]
    async fn test_register_success_and_conflict() {
        let backend = StubBackend::spawn().await;
        let storage = MemoryStorage::new();
        let store = store(&backend, &storage, ValidationCache::disabled());

        let outcome = store.register(&registration("taken@shop.in")).await.unwrap();
        assert_eq!(
            outcome,
            AuthOutcome::Failure {
                message: "User already exists".to_string(),
                unauthorized: false,
            }
        );

        let outcome = store.register(&registration("locked@shop.in")).await.unwrap();
        assert_eq!(
            outcome,
            AuthOutcome::Failure {
                message: "Account locked".to_string(),
                unauthorized: true,
            }
        );

        let outcome = store.register(&registration("new@shop.in")).await.unwrap();
        assert!(outcome.is_success());
        assert!(store.is_authenticated());
        assert_eq!(
            store.snapshot().user.as_ref().unwrap().email.as_deref(),
            Some("new@shop.in")
        );
    }

    #[tokio::test]
    async fn test_initialize_with_valid_token() {
        let backend = StubBackend::spawn().await;
        let storage = MemoryStorage::new();
        storage.set_item(keys::TOKEN, "tok-asha@shop.in").await.unwrap();
        let store = store(&backend, &storage, ValidationCache::disabled());

        let resolved = store.initialize().await.unwrap();

        assert!(!resolved.token_rejected);
        let session = resolved.session;
        assert!(session.is_authenticated());
        assert_eq!(session.user.as_ref().unwrap().first_name.as_deref(), Some("Asha"));
    }

    #[tokio::test]
    async fn test_initialize_with_expired_token_reports_rejection() {
        let backend = StubBackend::spawn().await;
        let storage = MemoryStorage::new();
        storage.set_item(keys::TOKEN, "expired").await.unwrap();
        storage.set_item(keys::USER, r#"{"firstName":"Old"}"#).await.unwrap();
        let store = store(&backend, &storage, ValidationCache::disabled());

        let resolved = store.initialize().await.unwrap();

        assert!(resolved.token_rejected);
        assert!(!resolved.session.loading);
        assert!(!resolved.session.is_authenticated());
        assert_eq!(storage.get_item(keys::TOKEN).await.unwrap(), None);
        assert_eq!(storage.get_item(keys::USER).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_initialize_with_failing_backend_logs_out() {
        let backend = StubBackend::spawn().await;
        let storage = MemoryStorage::new();
        storage.set_item(keys::TOKEN, "boom").await.unwrap();
        storage.set_item(keys::USER, r#"{"firstName":"Old"}"#).await.unwrap();
        let store = store(&backend, &storage, ValidationCache::disabled());

        let resolved = store.initialize().await.unwrap();

        assert!(resolved.token_rejected);
        assert!(!resolved.session.is_authenticated());
        assert_eq!(storage.get_item(keys::TOKEN).await.unwrap(), None);
        assert_eq!(storage.get_item(keys::USER).await.unwrap(), None);

        // Storage is clean, so the next request starts anonymous.
        let next = store.initialize().await.unwrap();
        assert!(!next.token_rejected);
    }

    #[tokio::test]
    async fn test_validation_cache_skips_backend() {
        let backend = StubBackend::spawn().await;
        let cache = ValidationCache::new(Duration::from_secs(60));

        for _ in 0..3 {
            let storage = MemoryStorage::new();
            storage.set_item(keys::TOKEN, "tok-asha@shop.in").await.unwrap();
            let resolved = store(&backend, &storage, cache.clone())
                .initialize()
                .await
                .unwrap();
            assert!(resolved.session.is_authenticated());
        }

        assert_eq!(backend.me_calls(), 1);
    }

    #[tokio::test]
    async fn test_disabled_cache_sees_revocation() {
        let backend = StubBackend::spawn().await;
        let cache = ValidationCache::new(Duration::ZERO);
        let storage = MemoryStorage::new();
        storage.set_item(keys::TOKEN, "tok-asha@shop.in").await.unwrap();

        let resolved = store(&backend, &storage, cache.clone()).initialize().await.unwrap();
        assert!(resolved.session.is_authenticated());

        // The backend now rejects what is stored
        storage.set_item(keys::TOKEN, "expired").await.unwrap();
        let resolved = store(&backend, &storage, cache).initialize().await.unwrap();

        assert!(resolved.token_rejected);
        assert_eq!(backend.me_calls(), 2);
    }

    #[tokio::test]
    async fn test_logout_invalidates_cache() {
        let backend = StubBackend::spawn().await;
        let cache = ValidationCache::new(Duration::from_secs(60));
        let storage = MemoryStorage::new();
        storage.set_item(keys::TOKEN, "tok-asha@shop.in").await.unwrap();

        let first = store(&backend, &storage, cache.clone());
        first.initialize().await.unwrap();
        first.logout().await.unwrap();

        storage.set_item(keys::TOKEN, "tok-asha@shop.in").await.unwrap();
        store(&backend, &storage, cache).initialize().await.unwrap();

        assert_eq!(backend.me_calls(), 2);
    }

    #[tokio::test]
    async fn test_subscribers_see_transitions() {
        let backend = StubBackend::spawn().await;
        let store = store(&backend, &MemoryStorage::new(), ValidationCache::disabled());
        let mut rx = store.subscribe();

        store.initialize().await.unwrap();
        assert!(rx.has_changed().unwrap());
        assert!(!rx.borrow_and_update().loading);

        store
            .login(&credentials("asha@shop.in", VALID_PASSWORD))
            .await
            .unwrap();
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_authenticated());
    }
}
