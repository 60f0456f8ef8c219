//! Auth session snapshot and the user profile it carries.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Profile object returned by the backend.
///
/// Only the fields the site renders are typed; anything else the backend
/// sends is kept in `extra` so a stored profile round-trips unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    /// A profile with no fields at all does not count as a signed-in user.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.contact.is_none()
            && self.services.is_none()
            && self.extra.is_empty()
    }

    /// Name for greetings: first name, else email, else "there".
    #[must_use]
    pub fn greeting_name(&self) -> &str {
        self.first_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or(self.email.as_deref())
            .unwrap_or("there")
    }
}

/// Point-in-time auth state.
///
/// Values are never mutated in place; every transition of the
/// [`AuthStore`](super::AuthStore) publishes a fresh `Session`.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: Option<SecretString>,
    pub user: Option<UserProfile>,
    /// True until the stored token has been checked.
    pub loading: bool,
}

impl Session {
    /// State before the stored token has been checked.
    #[must_use]
    pub const fn pending() -> Self {
        Self {
            token: None,
            user: None,
            loading: true,
        }
    }

    /// Checked, nobody signed in.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            token: None,
            user: None,
            loading: false,
        }
    }

    /// Checked, signed in.
    #[must_use]
    pub const fn authenticated(token: SecretString, user: UserProfile) -> Self {
        Self {
            token: Some(token),
            user: Some(user),
            loading: false,
        }
    }

    /// Both a non-empty token and a non-empty profile are present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        let has_token = self
            .token
            .as_ref()
            .is_some_and(|t| !t.expose_secret().is_empty());
        let has_user = self.user.as_ref().is_some_and(|u| !u.is_empty());
        has_token && has_user
    }

    /// The signed-in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<&UserProfile> {
        if self.is_authenticated() {
            self.user.as_ref()
        } else {
            None
        }
    }
}
