//! Signed-cookie session for the shopper's cart.
//!
//! The only server-side session state is the remote cart ID, carried in a
//! signed cookie. Helpers here never mutate a jar in place: each write
//! returns a new jar that the handler must include in its response, so a
//! handler that forgets to return the jar simply leaves the session
//! unchanged rather than half-written.

use axum_extra::extract::SignedCookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

/// Cookie holding the remote cart ID.
pub const CART_COOKIE: &str = "cart_id";

/// Cookie holding the opaque customer access token, when signed in.
pub const CUSTOMER_TOKEN_COOKIE: &str = "customer_token";

/// Carts are kept for 30 days, matching the remote API's cart retention.
const CART_COOKIE_MAX_AGE: Duration = Duration::days(30);

/// Read the cart ID from the signed jar.
///
/// Returns `None` when no cart cookie is present or its signature does not
/// verify (the jar drops tampered cookies before we see them).
#[must_use]
pub fn cart_id(jar: &SignedCookieJar) -> Option<String> {
    jar.get(CART_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|id| !id.is_empty())
}

/// Return a jar with the cart ID set.
#[must_use]
pub fn with_cart_id(jar: SignedCookieJar, cart_id: &str, secure: bool) -> SignedCookieJar {
    let mut cookie = Cookie::new(CART_COOKIE, cart_id.to_string());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_secure(secure);
    cookie.set_max_age(CART_COOKIE_MAX_AGE);
    jar.add(cookie)
}

/// Return a jar with the cart cookie removed.
#[must_use]
pub fn without_cart_id(jar: SignedCookieJar) -> SignedCookieJar {
    jar.remove(Cookie::from(CART_COOKIE))
}

/// Read the customer access token, set by the sign-in flow.
#[must_use]
pub fn customer_token(jar: &SignedCookieJar) -> Option<String> {
    jar.get(CUSTOMER_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
}

/// Return a jar with the customer token set.
#[must_use]
pub fn with_customer_token(jar: SignedCookieJar, token: &str, secure: bool) -> SignedCookieJar {
    let mut cookie = Cookie::new(CUSTOMER_TOKEN_COOKIE, token.to_string());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_secure(secure);
    jar.add(cookie)
}
