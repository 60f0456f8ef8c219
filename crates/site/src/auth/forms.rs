//! Login and registration forms, and the typed payloads built from them.
//!
//! Raw form records are validated once here; everything downstream works with
//! [`Credentials`] and [`RegistrationProfile`], which cannot hold invalid data.

use std::collections::BTreeMap;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};
use spaceway_core::{ContactNumber, Email, ServiceTag};

/// Minimum password length accepted by both forms.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Per-field validation messages, keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// Validated login credentials.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: Email,
    #[serde(serialize_with = "expose_password")]
    pub password: SecretString,
}

/// Validated registration payload, sent to the backend in camelCase.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    #[serde(serialize_with = "expose_password")]
    pub password: SecretString,
    pub contact: ContactNumber,
    pub services: Vec<ServiceTag>,
    pub terms: bool,
}

fn expose_password<S: Serializer>(
    password: &SecretString,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(password.expose_secret())
}

/// Raw login form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginForm {
    /// Validate into [`Credentials`].
    ///
    /// # Errors
    ///
    /// Returns every failing field with its message.
    pub fn validate(self) -> Result<Credentials, FieldErrors> {
        let mut errors = FieldErrors::default();

        let email = parse_email(&self.email, &mut errors);
        check_password(&self.password, &mut errors);

        match email {
            Some(email) if errors.is_empty() => Ok(Credentials {
                email,
                password: SecretString::from(self.password),
            }),
            _ => Err(errors),
        }
    }
}

/// Raw registration form.
///
/// Built from the url-encoded body with [`RegisterForm::from_pairs`] because
/// `services` is a repeated checkbox field.
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub contact: String,
    pub services: Vec<String>,
    pub terms: bool,
}

impl RegisterForm {
    /// Collect fields from decoded `(name, value)` pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut form = Self::default();
        for (key, value) in pairs {
            let value = value.into();
            match key.as_ref() {
                "firstName" => form.first_name = value,
                "lastName" => form.last_name = value,
                "email" => form.email = value,
                "password" => form.password = value,
                "contact" => form.contact = value,
                "services" => form.services.push(value),
                "terms" => form.terms = matches!(value.as_str(), "on" | "true" | "1"),
                _ => {}
            }
        }
        form
    }

    /// Parse an `application/x-www-form-urlencoded` body.
    #[must_use]
    pub fn from_urlencoded(body: &[u8]) -> Self {
        Self::from_pairs(url::form_urlencoded::parse(body).into_owned())
    }

    /// Whether a service checkbox should be rendered checked.
    #[must_use]
    pub fn has_service(&self, tag: &str) -> bool {
        self.services.iter().any(|s| s == tag)
    }

    /// Validate into a [`RegistrationProfile`].
    ///
    /// # Errors
    ///
    /// Returns every failing field with its message.
    pub fn validate(&self) -> Result<RegistrationProfile, FieldErrors> {
        let mut errors = FieldErrors::default();

        let first_name = self.first_name.trim();
        if first_name.is_empty() {
            errors.insert("firstName", "First name is required");
        }
        let last_name = self.last_name.trim();
        if last_name.is_empty() {
            errors.insert("lastName", "Last name is required");
        }

        let email = parse_email(&self.email, &mut errors);
        check_password(&self.password, &mut errors);

        let contact = ContactNumber::parse(self.contact.trim())
            .map_err(|e| errors.insert("contact", e.to_string()))
            .ok();

        let mut services = Vec::new();
        for raw in &self.services {
            match raw.parse::<ServiceTag>() {
                Ok(tag) if !services.contains(&tag) => services.push(tag),
                Ok(_) => {}
                Err(_) => errors.insert("services", "Unknown service selected"),
            }
        }
        if services.is_empty() {
            errors.insert("services", "Select at least one service");
        }

        if !self.terms {
            errors.insert("terms", "You must accept the terms and conditions");
        }

        match (email, contact) {
            (Some(email), Some(contact)) if errors.is_empty() => Ok(RegistrationProfile {
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                email,
                password: SecretString::from(self.password.clone()),
                contact,
                services,
                terms: true,
            }),
            _ => Err(errors),
        }
    }
}

fn parse_email(raw: &str, errors: &mut FieldErrors) -> Option<Email> {
    Email::parse(raw.trim())
        .map_err(|e| errors.insert("email", e.to_string()))
        .ok()
}

fn check_password(raw: &str, errors: &mut FieldErrors) {
    if raw.is_empty() {
        errors.insert("password", "Password is required");
    } else if raw.chars().count() < MIN_PASSWORD_LENGTH {
        errors.insert("password", "Password must be at least 8 characters");
    }
}
