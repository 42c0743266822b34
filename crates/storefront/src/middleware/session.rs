//! Session middleware configuration and the session-held cart.
//!
//! Sessions live in process memory only, in a [`CacheSessionStore`] that
//! drops each record once it expires. A visitor's cart is serialized into
//! their session under [`CART_KEY`] and is gone when the session expires or
//! the server restarts.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use shopfront_core::Cart;
use tower_sessions::cookie::{SameSite, time::Duration};
use tower_sessions::{Expiry, Session, SessionManagerLayer};

use crate::config::StorefrontConfig;
use crate::error::AppError;
use crate::middleware::session_store::CacheSessionStore;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "shopfront_session";

/// Session key the cart is stored under.
pub const CART_KEY: &str = "cart";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Create the session layer over the given store.
#[must_use]
pub fn create_session_layer(
    config: &StorefrontConfig,
    store: CacheSessionStore,
) -> SessionManagerLayer<CacheSessionStore> {
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(Duration::seconds(
            SESSION_EXPIRY_SECONDS,
        )))
        .with_secure(config.secure_cookies())
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// The visitor's session, viewed as a cart holder.
///
/// Extract it in a handler, [`load`](Self::load) the cart, change it, then
/// [`save`](Self::save) it back. A missing or unreadable cart loads as empty.
pub struct CartSession(Session);

impl CartSession {
    /// Read the cart from the session.
    pub async fn load(&self) -> Cart {
        match self.0.get::<Cart>(CART_KEY).await {
            Ok(cart) => cart.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable cart in session");
                Cart::default()
            }
        }
    }

    /// Write the cart back to the session.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Session` if the session store rejects the write.
    pub async fn save(&self, cart: &Cart) -> Result<(), AppError> {
        self.0.insert(CART_KEY, cart).await?;
        Ok(())
    }
}

impl<S> FromRequestParts<S> for CartSession
where
    S: Send + Sync,
{
    type Rejection = <Session as FromRequestParts<S>>::Rejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Session::from_request_parts(parts, state).await.map(Self)
    }
}
