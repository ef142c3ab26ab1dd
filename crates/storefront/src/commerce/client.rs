//! Commerce API client implementation.
//!
//! Plain `reqwest` JSON POSTs of the documents in [`super::queries`].
//! Products are cached using `moka` (5-minute TTL); carts never are.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::config::CommerceConfig;

use super::conversions::{convert_cart, convert_mutation, convert_product};
use super::types::{
    AttributeInput, BuyerIdentityInput, Cart, CartLineInput, CartLineUpdateInput, CartMutation,
    Product,
};
use super::{CommerceError, GraphQLError, queries, wire};

#[derive(Serialize)]
struct GraphQLRequest<'a> {
    query: &'a str,
    variables: serde_json::Value,
}

// =============================================================================
// CommerceClient
// =============================================================================

/// Client for the commerce storefront API.
///
/// Provides type-safe access to products and cart operations.
/// Products are cached for 5 minutes.
#[derive(Clone)]
pub struct CommerceClient {
    inner: Arc<CommerceClientInner>,
}

struct CommerceClientInner {
    client: reqwest::Client,
    endpoint: String,
    api_token: String,
    product_cache: Cache<String, Arc<Product>>,
}

impl CommerceClient {
    /// Create a new commerce API client.
    #[must_use]
    pub fn new(config: &CommerceConfig) -> Self {
        let product_cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        let endpoint = format!(
            "https://{}/api/{}/graphql.json",
            config.store, config.api_version
        );

        Self {
            inner: Arc::new(CommerceClientInner {
                client: reqwest::Client::new(),
                endpoint,
                api_token: config.api_token.expose_secret().to_string(),
                product_cache,
            }),
        }
    }

    /// Execute a GraphQL document.
    async fn execute<T: DeserializeOwned>(
        &self,
        document: &str,
        variables: serde_json::Value,
    ) -> Result<T, CommerceError> {
        let request_body = GraphQLRequest {
            query: document,
            variables,
        };

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            // Private access tokens use a dedicated header, not Authorization
            .header("Shopify-Storefront-Private-Token", &self.inner.api_token)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(CommerceError::RateLimited(retry_after));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Commerce API returned non-success status"
            );
            return Err(CommerceError::GraphQL(vec![GraphQLError::message(
                format!(
                    "HTTP {status}: {}",
                    response_text.chars().take(200).collect::<String>()
                ),
            )]));
        }

        let response: wire::GraphQLResponse<T> = match serde_json::from_str(&response_text) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse commerce GraphQL response"
                );
                return Err(CommerceError::Parse(e));
            }
        };

        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            tracing::debug!(errors = ?errors, "GraphQL errors in response");

            return Err(CommerceError::GraphQL(
                errors
                    .into_iter()
                    .map(|e| GraphQLError {
                        message: e.message,
                        path: e.path.unwrap_or_default(),
                    })
                    .collect(),
            ));
        }

        response.data.ok_or_else(|| {
            tracing::error!(
                body = %response_text.chars().take(500).collect::<String>(),
                "Commerce GraphQL response has no data and no errors"
            );
            CommerceError::GraphQL(vec![GraphQLError::message("No data in response")])
        })
    }

    /// Unwrap a mutation payload, treating a missing payload as a protocol
    /// error.
    fn into_mutation(
        payload: Option<wire::CartMutationData>,
        operation: &str,
    ) -> Result<CartMutation, CommerceError> {
        payload.map(convert_mutation).ok_or_else(|| {
            CommerceError::GraphQL(vec![GraphQLError::message(format!(
                "{operation} returned no payload"
            ))])
        })
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get a product by its handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the API request fails.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn product_by_handle(&self, handle: &str) -> Result<Arc<Product>, CommerceError> {
        let cache_key = format!("product:{handle}");

        if let Some(product) = self.inner.product_cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(product);
        }

        let data: wire::ProductRoot = self
            .execute(
                queries::GET_PRODUCT_BY_HANDLE,
                serde_json::json!({ "handle": handle }),
            )
            .await?;

        let product_data = data
            .product
            .ok_or_else(|| CommerceError::NotFound(format!("Product not found: {handle}")))?;

        let product = Arc::new(convert_product(product_data));

        self.inner
            .product_cache
            .insert(cache_key, Arc::clone(&product))
            .await;

        Ok(product)
    }

    // =========================================================================
    // Cart Methods (not cached - mutable state)
    // =========================================================================

    /// Get an existing cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart is not found or the API request fails.
    #[instrument(skip(self), fields(cart_id = %cart_id))]
    pub async fn cart(&self, cart_id: &str) -> Result<Cart, CommerceError> {
        let data: wire::CartRoot = self
            .execute(
                &queries::with_cart_fragment(queries::GET_CART),
                serde_json::json!({ "cartId": cart_id }),
            )
            .await?;

        data.cart
            .map(convert_cart)
            .ok_or_else(|| CommerceError::NotFound(format!("Cart not found: {cart_id}")))
    }

    /// Create a new cart with the given lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails at the transport or
    /// GraphQL level. User errors travel in the returned [`CartMutation`].
    #[instrument(skip(self, lines))]
    pub async fn cart_create(
        &self,
        lines: Vec<CartLineInput>,
    ) -> Result<CartMutation, CommerceError> {
        let data: wire::CartCreateRoot = self
            .execute(
                &queries::with_cart_fragment(queries::CART_CREATE),
                serde_json::json!({ "input": { "lines": lines } }),
            )
            .await?;

        Self::into_mutation(data.cart_create, "cartCreate")
    }

    /// Add lines to a cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails at the transport or
    /// GraphQL level. User errors travel in the returned [`CartMutation`].
    #[instrument(skip(self, lines), fields(cart_id = %cart_id))]
    pub async fn cart_lines_add(
        &self,
        cart_id: &str,
        lines: Vec<CartLineInput>,
    ) -> Result<CartMutation, CommerceError> {
        let data: wire::CartLinesAddRoot = self
            .execute(
                &queries::with_cart_fragment(queries::CART_LINES_ADD),
                serde_json::json!({ "cartId": cart_id, "lines": lines }),
            )
            .await?;

        Self::into_mutation(data.cart_lines_add, "cartLinesAdd")
    }

    /// Update cart lines. Quantity 0 removes the line.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails at the transport or
    /// GraphQL level. User errors travel in the returned [`CartMutation`].
    #[instrument(skip(self, lines), fields(cart_id = %cart_id))]
    pub async fn cart_lines_update(
        &self,
        cart_id: &str,
        lines: Vec<CartLineUpdateInput>,
    ) -> Result<CartMutation, CommerceError> {
        let data: wire::CartLinesUpdateRoot = self
            .execute(
                &queries::with_cart_fragment(queries::CART_LINES_UPDATE),
                serde_json::json!({ "cartId": cart_id, "lines": lines }),
            )
            .await?;

        Self::into_mutation(data.cart_lines_update, "cartLinesUpdate")
    }

    /// Remove lines from a cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails at the transport or
    /// GraphQL level. User errors travel in the returned [`CartMutation`].
    #[instrument(skip(self, line_ids), fields(cart_id = %cart_id))]
    pub async fn cart_lines_remove(
        &self,
        cart_id: &str,
        line_ids: Vec<String>,
    ) -> Result<CartMutation, CommerceError> {
        let data: wire::CartLinesRemoveRoot = self
            .execute(
                &queries::with_cart_fragment(queries::CART_LINES_REMOVE),
                serde_json::json!({ "cartId": cart_id, "lineIds": line_ids }),
            )
            .await?;

        Self::into_mutation(data.cart_lines_remove, "cartLinesRemove")
    }

    /// Replace the discount codes on a cart.
    ///
    /// This is a full replace: codes not present in `discount_codes` are
    /// dropped by the remote API.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails at the transport or
    /// GraphQL level. User errors travel in the returned [`CartMutation`].
    #[instrument(skip(self, discount_codes), fields(cart_id = %cart_id))]
    pub async fn cart_discount_codes_update(
        &self,
        cart_id: &str,
        discount_codes: Vec<String>,
    ) -> Result<CartMutation, CommerceError> {
        let data: wire::CartDiscountCodesUpdateRoot = self
            .execute(
                &queries::with_cart_fragment(queries::CART_DISCOUNT_CODES_UPDATE),
                serde_json::json!({ "cartId": cart_id, "discountCodes": discount_codes }),
            )
            .await?;

        Self::into_mutation(data.cart_discount_codes_update, "cartDiscountCodesUpdate")
    }

    /// Merge buyer identity fields onto a cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails at the transport or
    /// GraphQL level. User errors travel in the returned [`CartMutation`].
    #[instrument(skip(self, buyer_identity), fields(cart_id = %cart_id))]
    pub async fn cart_buyer_identity_update(
        &self,
        cart_id: &str,
        buyer_identity: BuyerIdentityInput,
    ) -> Result<CartMutation, CommerceError> {
        let data: wire::CartBuyerIdentityUpdateRoot = self
            .execute(
                &queries::with_cart_fragment(queries::CART_BUYER_IDENTITY_UPDATE),
                serde_json::json!({ "cartId": cart_id, "buyerIdentity": buyer_identity }),
            )
            .await?;

        Self::into_mutation(data.cart_buyer_identity_update, "cartBuyerIdentityUpdate")
    }

    /// Replace the custom attributes on a cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails at the transport or
    /// GraphQL level. User errors travel in the returned [`CartMutation`].
    #[instrument(skip(self, attributes), fields(cart_id = %cart_id))]
    pub async fn cart_attributes_update(
        &self,
        cart_id: &str,
        attributes: Vec<AttributeInput>,
    ) -> Result<CartMutation, CommerceError> {
        let data: wire::CartAttributesUpdateRoot = self
            .execute(
                &queries::with_cart_fragment(queries::CART_ATTRIBUTES_UPDATE),
                serde_json::json!({ "cartId": cart_id, "attributes": attributes }),
            )
            .await?;

        Self::into_mutation(data.cart_attributes_update, "cartAttributesUpdate")
    }
}
