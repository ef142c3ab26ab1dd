//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products/{handle}      - Product detail with resolved variant
//!
//! # Cart
//! POST /cart                   - Dispatch one of six cart mutations
//! GET  /cart                   - Cart snapshot
//! GET  /cart/count             - Cart count badge (HTMX fragment)
//!
//! # Checkout
//! GET  /checkout               - Redirect to remote checkout
//! ```

pub mod cart;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Health check endpoint.
async fn health() -> &'static str {
    "OK"
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(cart::dispatch).get(cart::show))
        .route("/count", get(cart::count))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new().route("/{handle}", get(products::show))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .route("/checkout", get(cart::checkout))
}
