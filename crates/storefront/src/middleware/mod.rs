//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (hub per request, HTTP context)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Session layer (tower-sessions over a bounded moka store)

pub mod request_id;
pub mod session;
pub mod session_store;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use session::{CartSession, SESSION_COOKIE_NAME, create_session_layer};
pub use session_store::CacheSessionStore;
