//! Toast notices queued in storage and shown on the next rendered page.

use serde::{Deserialize, Serialize};

use super::storage::{SessionStorage, StorageError, keys};

/// Oldest notices are dropped beyond this many.
const MAX_QUEUED: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

impl NoticeLevel {
    /// CSS modifier class.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// A user-facing, non-blocking message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Append a notice to the queue.
///
/// A corrupt queue is replaced rather than failing the request.
///
/// # Errors
///
/// Returns [`StorageError`] if the backing store fails.
pub async fn push_notice(storage: &dyn SessionStorage, notice: Notice) -> Result<(), StorageError> {
    let mut queue: Vec<Notice> = storage
        .get_item(keys::NOTICES)
        .await?
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default();

    queue.push(notice);
    if queue.len() > MAX_QUEUED {
        queue.drain(..queue.len() - MAX_QUEUED);
    }

    let raw = serde_json::to_string(&queue)?;
    storage.set_item(keys::NOTICES, &raw).await
}

/// Remove and return every queued notice.
///
/// # Errors
///
/// Returns [`StorageError`] if the backing store fails.
pub async fn take_notices(storage: &dyn SessionStorage) -> Result<Vec<Notice>, StorageError> {
    let Some(raw) = storage.get_item(keys::NOTICES).await? else {
        return Ok(Vec::new());
    };
    storage.remove_item(keys::NOTICES).await?;

    Ok(serde_json::from_str(&raw).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Discarding unreadable notice queue");
        Vec::new()
    }))
}
