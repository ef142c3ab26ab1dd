//! Application state shared across handlers.

use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use secrecy::ExposeSecret;
use url::Url;

use crate::cart::UpsellInjector;
use crate::commerce::CommerceClient;
use crate::config::StorefrontConfig;

/// Error building the application state from configuration.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("invalid base_url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the commerce client and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    commerce: CommerceClient,
    upsell: UpsellInjector,
    cookie_key: Key,
    secure_cookies: bool,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a valid URL.
    pub fn new(config: StorefrontConfig) -> Result<Self, StateError> {
        let commerce = CommerceClient::new(&config.commerce);
        let upsell = UpsellInjector::new(config.upsell.clone());

        // Config guarantees the secret meets the key derivation minimum
        let cookie_key = Key::derive_from(config.session_secret.expose_secret().as_bytes());

        let base_url = Url::parse(&config.base_url)?;
        let secure_cookies = base_url.scheme() == "https";

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                commerce,
                upsell,
                cookie_key,
                secure_cookies,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the commerce API client.
    #[must_use]
    pub fn commerce(&self) -> &CommerceClient {
        &self.inner.commerce
    }

    /// Get a reference to the shipping protection injector.
    #[must_use]
    pub fn upsell(&self) -> &UpsellInjector {
        &self.inner.upsell
    }

    /// Whether cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn secure_cookies(&self) -> bool {
        self.inner.secure_cookies
    }
}

// Lets SignedCookieJar extract its signing key from the router state.
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.inner.cookie_key.clone()
    }
}
