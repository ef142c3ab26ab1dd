//! Domain types for the commerce API.
//!
//! These types provide a clean, ergonomic API separate from the raw
//! GraphQL wire shapes in `wire`. Input types serialize with camelCase
//! field names because they are embedded verbatim in mutation variables.

use serde::{Deserialize, Serialize};

pub use driftwood_core::Money;

// =============================================================================
// Image Types
// =============================================================================

/// Product or variant image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Image URL.
    pub url: String,
    /// Alt text for accessibility.
    pub alt_text: Option<String>,
}

// =============================================================================
// Product Types
// =============================================================================

/// Selected option on a product variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedOption {
    /// Option name (e.g., "Size", "Color").
    pub name: String,
    /// Selected value (e.g., "Large", "Blue").
    pub value: String,
}

/// Product option definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOption {
    /// Option name (e.g., "Size").
    pub name: String,
    /// Available values (e.g., `["Small", "Medium", "Large"]`).
    pub values: Vec<String>,
}

/// A product variant (specific combination of options).
///
/// For a given product, no two variants share an identical combination of
/// selected options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductVariant {
    /// Variant ID.
    pub id: String,
    /// Variant title (combination of option values).
    pub title: String,
    /// Whether this variant is available for sale.
    pub available_for_sale: bool,
    /// Current price.
    pub price: Money,
    /// Compare-at price (original price if on sale).
    pub compare_at_price: Option<Money>,
    /// Selected options for this variant.
    pub selected_options: Vec<SelectedOption>,
    /// Variant image.
    pub image: Option<Image>,
}

/// A product in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product ID.
    pub id: String,
    /// URL handle.
    pub handle: String,
    /// Product title.
    pub title: String,
    /// Plain text description.
    pub description: String,
    /// Whether any variant is available.
    pub available_for_sale: bool,
    /// Product tags.
    pub tags: Vec<String>,
    /// Product options, in declaration order.
    pub options: Vec<ProductOption>,
    /// Product variants, in declaration order.
    pub variants: Vec<ProductVariant>,
}

// =============================================================================
// Cart Types
// =============================================================================

/// Custom attribute (key-value pair).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute key.
    pub key: String,
    /// Attribute value.
    pub value: Option<String>,
}

/// Input for custom attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeInput {
    /// Attribute key.
    pub key: String,
    /// Attribute value.
    pub value: String,
}

/// Merchandise in a cart line (simplified product variant info).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartMerchandise {
    /// Variant ID.
    pub id: String,
    /// Variant title.
    pub title: String,
    /// Current price.
    pub price: Money,
    /// Selected options.
    pub selected_options: Vec<SelectedOption>,
    /// Variant image.
    pub image: Option<Image>,
    /// Parent product info.
    pub product: CartMerchandiseProduct,
}

/// Simplified product info for cart merchandise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartMerchandiseProduct {
    /// Product ID.
    pub id: String,
    /// Product handle.
    pub handle: String,
    /// Product title.
    pub title: String,
}

/// Cost for a cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineCost {
    /// Price per unit.
    pub amount_per_quantity: Money,
    /// Total (after discounts).
    pub total_amount: Money,
}

/// A line item in the cart.
///
/// Quantity is always positive in a returned cart; updating a line to
/// quantity 0 removes it rather than displaying a zero-quantity row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Cart line ID.
    pub id: String,
    /// Quantity.
    pub quantity: i64,
    /// Custom attributes.
    pub attributes: Vec<Attribute>,
    /// Line cost.
    pub cost: CartLineCost,
    /// Product variant.
    pub merchandise: CartMerchandise,
}

/// Cart cost summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartCost {
    /// Subtotal before tax/shipping.
    pub subtotal: Money,
    /// Total amount.
    pub total: Money,
    /// Total tax amount.
    pub total_tax: Option<Money>,
}

/// Discount code applied to cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartDiscountCode {
    /// The discount code.
    pub code: String,
    /// Whether the code is applicable.
    pub applicable: bool,
}

/// Customer info in buyer identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartCustomer {
    /// Customer ID.
    pub id: String,
    /// Email.
    pub email: Option<String>,
}

/// Buyer identity for the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartBuyerIdentity {
    /// Email address.
    pub email: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Country code.
    pub country_code: Option<String>,
    /// Logged-in customer.
    pub customer: Option<CartCustomer>,
}

/// A shopping cart.
///
/// Carts are never mutated in place: every mutation returns a new
/// authoritative snapshot, and the `id` in that snapshot is the one to
/// persist going forward (it can differ from the one sent in the request).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    /// Cart ID.
    pub id: String,
    /// Checkout URL.
    pub checkout_url: String,
    /// Cart note.
    pub note: Option<String>,
    /// Total item quantity.
    pub total_quantity: i64,
    /// Custom attributes.
    pub attributes: Vec<Attribute>,
    /// Buyer identity.
    pub buyer_identity: Option<CartBuyerIdentity>,
    /// Cart cost summary.
    pub cost: CartCost,
    /// Applied discount codes.
    pub discount_codes: Vec<CartDiscountCode>,
    /// Cart lines.
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// Whether any line carries the given merchandise id.
    #[must_use]
    pub fn contains_merchandise(&self, merchandise_id: &str) -> bool {
        self.lines
            .iter()
            .any(|line| line.merchandise.id == merchandise_id)
    }
}

// =============================================================================
// Mutation Input Types
// =============================================================================

/// Input for adding a line to cart.
///
/// If the merchandise already exists in the cart the quantities merge
/// additively, per remote API semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineInput {
    /// Product variant ID.
    pub merchandise_id: String,
    /// Quantity to add.
    pub quantity: i64,
    /// Custom attributes.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub attributes: Option<Vec<AttributeInput>>,
}

/// Input for updating a cart line. Quantity 0 signals removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineUpdateInput {
    /// Cart line ID.
    pub id: String,
    /// New quantity.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub quantity: Option<i64>,
    /// New merchandise ID.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub merchandise_id: Option<String>,
    /// New attributes.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub attributes: Option<Vec<AttributeInput>>,
}

/// Partial buyer identity fields for `cartBuyerIdentityUpdate`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerIdentityInput {
    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub email: Option<String>,
    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub phone: Option<String>,
    /// Country code.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub country_code: Option<String>,
    /// Customer access token (injected from the session when present).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub customer_access_token: Option<String>,
}

// =============================================================================
// Mutation Result Types
// =============================================================================

/// User error from cart mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartUserError {
    /// Error code.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub code: Option<String>,
    /// Field path that caused the error.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub field: Option<Vec<String>>,
    /// Human-readable error message.
    pub message: String,
}

impl CartUserError {
    /// A bare error with only a message.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            code: None,
            field: None,
            message: message.into(),
        }
    }
}

/// Result of a cart mutation: the fresh cart snapshot (if the API returned
/// one) plus any user errors. Both can be present at once, e.g. an invalid
/// discount code returns the unchanged cart alongside the error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartMutation {
    /// Authoritative cart snapshot after the mutation.
    pub cart: Option<Cart>,
    /// User errors reported by the mutation.
    pub user_errors: Vec<CartUserError>,
}

/// Shared fixtures for tests across the crate.
#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub(crate) fn sample_cart() -> Cart {
        Cart {
            id: "gid://shopify/Cart/abc".to_string(),
            checkout_url: "https://checkout.example/abc".to_string(),
            note: None,
            total_quantity: 1,
            attributes: vec![],
            buyer_identity: None,
            cost: CartCost {
                subtotal: Money::new("10.00", "USD"),
                total: Money::new("10.00", "USD"),
                total_tax: None,
            },
            discount_codes: vec![],
            lines: vec![CartLine {
                id: "gid://shopify/CartLine/1".to_string(),
                quantity: 1,
                attributes: vec![],
                cost: CartLineCost {
                    amount_per_quantity: Money::new("10.00", "USD"),
                    total_amount: Money::new("10.00", "USD"),
                },
                merchandise: CartMerchandise {
                    id: "gid://shopify/ProductVariant/11".to_string(),
                    title: "Default Title".to_string(),
                    price: Money::new("10.00", "USD"),
                    selected_options: vec![],
                    image: None,
                    product: CartMerchandiseProduct {
                        id: "gid://shopify/Product/1".to_string(),
                        handle: "sea-salt-soap".to_string(),
                        title: "Sea Salt Soap".to_string(),
                    },
                },
            }],
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_line_input_serializes_camel_case() {
        let line = CartLineInput {
            merchandise_id: "gid://shopify/ProductVariant/1".to_string(),
            quantity: 2,
            attributes: None,
        };
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["merchandiseId"], "gid://shopify/ProductVariant/1");
        assert_eq!(json["quantity"], 2);
        assert!(json.get("attributes").is_none());
    }

    #[test]
    fn test_buyer_identity_input_skips_absent_fields() {
        let identity = BuyerIdentityInput {
            email: Some("shopper@example.net".to_string()),
            ..BuyerIdentityInput::default()
        };
        let json = serde_json::to_value(&identity).unwrap();
        assert_eq!(json["email"], "shopper@example.net");
        assert!(json.get("customerAccessToken").is_none());
    }

    #[test]
    fn test_contains_merchandise() {
        let cart = fixtures::sample_cart();
        assert!(cart.contains_merchandise("gid://shopify/ProductVariant/11"));
        assert!(!cart.contains_merchandise("gid://shopify/ProductVariant/99"));
    }
}
