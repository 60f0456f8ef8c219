//! Core types for Spaceway.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod contact;
pub mod email;
pub mod service;
pub mod theme;

pub use contact::{ContactNumber, ContactNumberError};
pub use email::{Email, EmailError};
pub use service::{ServiceTag, UnknownServiceTag};
pub use theme::Theme;
