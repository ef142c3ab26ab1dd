//! GraphQL documents for the commerce API.
//!
//! Cart operations share the `CartFields` fragment so every mutation
//! returns the same full cart snapshot. Use [`with_cart_fragment`] to
//! build the final document for cart operations.

/// Fields returned for every cart snapshot.
pub const CART_FRAGMENT: &str = r"
fragment CartFields on Cart {
  id
  checkoutUrl
  note
  totalQuantity
  attributes { key value }
  buyerIdentity {
    email
    phone
    countryCode
    customer { id email }
  }
  cost {
    subtotalAmount { amount currencyCode }
    totalAmount { amount currencyCode }
    totalTaxAmount { amount currencyCode }
  }
  discountCodes { code applicable }
  lines(first: 100) {
    nodes {
      id
      quantity
      attributes { key value }
      cost {
        amountPerQuantity { amount currencyCode }
        totalAmount { amount currencyCode }
      }
      merchandise {
        ... on ProductVariant {
          id
          title
          price { amount currencyCode }
          selectedOptions { name value }
          image { url altText }
          product { id handle title }
        }
      }
    }
  }
}";

pub const GET_PRODUCT_BY_HANDLE: &str = r"
query GetProductByHandle($handle: String!) {
  product(handle: $handle) {
    id
    handle
    title
    description
    availableForSale
    tags
    options { name values }
    variants(first: 50) {
      nodes {
        id
        title
        availableForSale
        price { amount currencyCode }
        compareAtPrice { amount currencyCode }
        selectedOptions { name value }
        image { url altText }
      }
    }
  }
}";

pub const GET_CART: &str = r"
query GetCart($cartId: ID!) {
  cart(id: $cartId) {
    ...CartFields
  }
}";

pub const CART_CREATE: &str = r"
mutation CartCreate($input: CartInput!) {
  cartCreate(input: $input) {
    cart { ...CartFields }
    userErrors { code field message }
  }
}";

pub const CART_LINES_ADD: &str = r"
mutation CartLinesAdd($cartId: ID!, $lines: [CartLineInput!]!) {
  cartLinesAdd(cartId: $cartId, lines: $lines) {
    cart { ...CartFields }
    userErrors { code field message }
  }
}";

pub const CART_LINES_UPDATE: &str = r"
mutation CartLinesUpdate($cartId: ID!, $lines: [CartLineUpdateInput!]!) {
  cartLinesUpdate(cartId: $cartId, lines: $lines) {
    cart { ...CartFields }
    userErrors { code field message }
  }
}";

pub const CART_LINES_REMOVE: &str = r"
mutation CartLinesRemove($cartId: ID!, $lineIds: [ID!]!) {
  cartLinesRemove(cartId: $cartId, lineIds: $lineIds) {
    cart { ...CartFields }
    userErrors { code field message }
  }
}";

pub const CART_DISCOUNT_CODES_UPDATE: &str = r"
mutation CartDiscountCodesUpdate($cartId: ID!, $discountCodes: [String!]) {
  cartDiscountCodesUpdate(cartId: $cartId, discountCodes: $discountCodes) {
    cart { ...CartFields }
    userErrors { code field message }
  }
}";

pub const CART_BUYER_IDENTITY_UPDATE: &str = r"
mutation CartBuyerIdentityUpdate($cartId: ID!, $buyerIdentity: CartBuyerIdentityInput!) {
  cartBuyerIdentityUpdate(cartId: $cartId, buyerIdentity: $buyerIdentity) {
    cart { ...CartFields }
    userErrors { code field message }
  }
}";

pub const CART_ATTRIBUTES_UPDATE: &str = r"
mutation CartAttributesUpdate($cartId: ID!, $attributes: [AttributeInput!]!) {
  cartAttributesUpdate(cartId: $cartId, attributes: $attributes) {
    cart { ...CartFields }
    userErrors { code field message }
  }
}";

/// Append the cart fragment to a cart operation document.
#[must_use]
pub fn with_cart_fragment(document: &str) -> String {
    format!("{document}\n{CART_FRAGMENT}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_cart_fragment_appends_fragment() {
        let document = with_cart_fragment(GET_CART);
        assert!(document.contains("query GetCart"));
        assert!(document.contains("fragment CartFields on Cart"));
    }

    #[test]
    fn test_cart_mutations_spread_cart_fields() {
        for document in [
            CART_CREATE,
            CART_LINES_ADD,
            CART_LINES_UPDATE,
            CART_LINES_REMOVE,
            CART_DISCOUNT_CODES_UPDATE,
            CART_BUYER_IDENTITY_UPDATE,
            CART_ATTRIBUTES_UPDATE,
        ] {
            assert!(document.contains("...CartFields"), "missing spread: {document}");
            assert!(document.contains("userErrors"), "missing userErrors: {document}");
        }
    }
}
