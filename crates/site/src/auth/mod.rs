//! Visitor authentication.
//!
//! - [`storage`] - Per-visitor key-value storage (`token`, `user`, `theme`, `notices`)
//! - [`session`] - Immutable auth snapshots and the backend's user profile
//! - [`store`] - The auth state machine, published over a watch channel
//! - [`forms`] - Login/registration form validation and typed payloads
//! - [`notice`] - Toast queue shown on the next rendered page

pub mod forms;
pub mod notice;
pub mod session;
pub mod storage;
pub mod store;

pub use forms::{Credentials, FieldErrors, LoginForm, RegisterForm, RegistrationProfile};
pub use notice::{Notice, NoticeLevel, push_notice, take_notices};
pub use session::{Session, UserProfile};
pub use storage::{MemoryStorage, SessionStorage, StorageError, keys};
pub use store::{AuthOutcome, AuthStore, Initialized, ValidationCache};
