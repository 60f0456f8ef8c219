//! Application state shared across handlers.

use std::path::Path;
use std::sync::Arc;

use crate::api::{ApiClient, ApiError};
use crate::auth::ValidationCache;
use crate::config::SiteConfig;
use crate::content::{ContentError, ContentStore};

/// Error building application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("failed to build backend client: {0}")]
    Api(#[from] ApiError),
    #[error("failed to load content: {0}")]
    Content(#[from] ContentError),
}

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    api: ApiClient,
    validation_cache: ValidationCache,
    content: ContentStore,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Legal pages are loaded from `content_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend client cannot be built or the content
    /// directory cannot be read.
    pub fn new(config: SiteConfig, content_dir: &Path) -> Result<Self, StateError> {
        let api = ApiClient::new(&config.api)?;
        let validation_cache = ValidationCache::new(config.session_validation_ttl);
        let content = ContentStore::load(content_dir)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                api,
                validation_cache,
                content,
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Backend client.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    /// Token validation cache shared by every request's auth store.
    #[must_use]
    pub fn validation_cache(&self) -> &ValidationCache {
        &self.inner.validation_cache
    }

    /// Markdown legal pages.
    #[must_use]
    pub fn content(&self) -> &ContentStore {
        &self.inner.content
    }
}
