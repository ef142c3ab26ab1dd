//! Serde shapes for the commerce API's GraphQL JSON.
//!
//! These mirror the response side of the documents in [`super::queries`]
//! and are converted to the domain types in [`super::types`] by the
//! `conversions` module. Field names follow the API's camelCase.

use serde::Deserialize;

use super::types::CartUserError;

/// `{ nodes: [...] }` connection wrapper.
#[derive(Debug, Deserialize)]
pub struct NodeConnection<T> {
    pub nodes: Vec<T>,
}

/// GraphQL error entry in the response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQLErrorData {
    pub message: String,
    #[serde(default)]
    pub path: Option<Vec<serde_json::Value>>,
}

/// Top-level GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQLErrorData>>,
}

// =============================================================================
// Shared Fields
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyData {
    pub amount: String,
    pub currency_code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageData {
    pub url: String,
    pub alt_text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SelectedOptionData {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct AttributeData {
    pub key: String,
    pub value: Option<String>,
}

// =============================================================================
// Product Query
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ProductRoot {
    pub product: Option<ProductData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductData {
    pub id: String,
    pub handle: String,
    pub title: String,
    pub description: String,
    pub available_for_sale: bool,
    pub tags: Vec<String>,
    pub options: Vec<ProductOptionData>,
    pub variants: NodeConnection<VariantData>,
}

#[derive(Debug, Deserialize)]
pub struct ProductOptionData {
    pub name: String,
    pub values: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantData {
    pub id: String,
    pub title: String,
    pub available_for_sale: bool,
    pub price: MoneyData,
    pub compare_at_price: Option<MoneyData>,
    pub selected_options: Vec<SelectedOptionData>,
    pub image: Option<ImageData>,
}

// =============================================================================
// Cart Query / Mutations
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct CartRoot {
    pub cart: Option<CartData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartData {
    pub id: String,
    pub checkout_url: String,
    pub note: Option<String>,
    pub total_quantity: i64,
    #[serde(default)]
    pub attributes: Vec<AttributeData>,
    pub buyer_identity: Option<BuyerIdentityData>,
    pub cost: CartCostData,
    #[serde(default)]
    pub discount_codes: Vec<DiscountCodeData>,
    pub lines: NodeConnection<CartLineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerIdentityData {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub country_code: Option<String>,
    pub customer: Option<CustomerData>,
}

#[derive(Debug, Deserialize)]
pub struct CustomerData {
    pub id: String,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartCostData {
    pub subtotal_amount: MoneyData,
    pub total_amount: MoneyData,
    pub total_tax_amount: Option<MoneyData>,
}

#[derive(Debug, Deserialize)]
pub struct DiscountCodeData {
    pub code: String,
    pub applicable: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineData {
    pub id: String,
    pub quantity: i64,
    #[serde(default)]
    pub attributes: Vec<AttributeData>,
    pub cost: CartLineCostData,
    pub merchandise: MerchandiseData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineCostData {
    pub amount_per_quantity: MoneyData,
    pub total_amount: MoneyData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchandiseData {
    pub id: String,
    pub title: String,
    pub price: MoneyData,
    pub selected_options: Vec<SelectedOptionData>,
    pub image: Option<ImageData>,
    pub product: MerchandiseProductData,
}

#[derive(Debug, Deserialize)]
pub struct MerchandiseProductData {
    pub id: String,
    pub handle: String,
    pub title: String,
}

/// `{ cart, userErrors }` payload shared by all cart mutations.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartMutationData {
    pub cart: Option<CartData>,
    #[serde(default)]
    pub user_errors: Vec<CartUserError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartCreateRoot {
    pub cart_create: Option<CartMutationData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLinesAddRoot {
    pub cart_lines_add: Option<CartMutationData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLinesUpdateRoot {
    pub cart_lines_update: Option<CartMutationData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLinesRemoveRoot {
    pub cart_lines_remove: Option<CartMutationData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartDiscountCodesUpdateRoot {
    pub cart_discount_codes_update: Option<CartMutationData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartBuyerIdentityUpdateRoot {
    pub cart_buyer_identity_update: Option<CartMutationData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartAttributesUpdateRoot {
    pub cart_attributes_update: Option<CartMutationData>,
}
