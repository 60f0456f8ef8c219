//! HTTP middleware stack for the site.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, transactions)
//! 2. `TraceLayer` (request spans)
//! 3. Request ID (unique ID per request)
//! 4. CSP nonce (per-request nonce for inline scripts)
//! 5. Security headers (CSP with that nonce, frame denial, etc.)
//! 6. Session layer (tower-sessions, in-memory store)
//! 7. Auth context (per-request auth store over the session)
//! 8. Rate limiting on credential submissions (governor)

pub mod auth;
pub mod csp;
pub mod rate_limit;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use auth::{
    AuthContext, AuthRejection, CurrentAuth, GuardDecision, RequireAuth, auth_context_middleware,
    guard,
};
pub use csp::{CspNonce, csp_nonce_middleware};
pub use rate_limit::auth_rate_limiter;
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
