//! Wire-to-domain conversion functions.

use super::types::{
    Attribute, Cart, CartBuyerIdentity, CartCost, CartCustomer, CartDiscountCode, CartLine,
    CartLineCost, CartMerchandise, CartMerchandiseProduct, CartMutation, Image, Money, Product,
    ProductOption, ProductVariant, SelectedOption,
};
use super::wire;

pub fn convert_money(money: wire::MoneyData) -> Money {
    Money::new(money.amount, money.currency_code)
}

fn convert_image(image: wire::ImageData) -> Image {
    Image {
        url: image.url,
        alt_text: image.alt_text,
    }
}

fn convert_selected_option(option: wire::SelectedOptionData) -> SelectedOption {
    SelectedOption {
        name: option.name,
        value: option.value,
    }
}

fn convert_attribute(attribute: wire::AttributeData) -> Attribute {
    Attribute {
        key: attribute.key,
        value: attribute.value,
    }
}

// =============================================================================
// Products
// =============================================================================

pub fn convert_product(product: wire::ProductData) -> Product {
    Product {
        id: product.id,
        handle: product.handle,
        title: product.title,
        description: product.description,
        available_for_sale: product.available_for_sale,
        tags: product.tags,
        options: product
            .options
            .into_iter()
            .map(|o| ProductOption {
                name: o.name,
                values: o.values,
            })
            .collect(),
        variants: product
            .variants
            .nodes
            .into_iter()
            .map(convert_variant)
            .collect(),
    }
}

fn convert_variant(variant: wire::VariantData) -> ProductVariant {
    ProductVariant {
        id: variant.id,
        title: variant.title,
        available_for_sale: variant.available_for_sale,
        price: convert_money(variant.price),
        compare_at_price: variant.compare_at_price.map(convert_money),
        selected_options: variant
            .selected_options
            .into_iter()
            .map(convert_selected_option)
            .collect(),
        image: variant.image.map(convert_image),
    }
}

// =============================================================================
// Carts
// =============================================================================

pub fn convert_cart(cart: wire::CartData) -> Cart {
    Cart {
        id: cart.id,
        checkout_url: cart.checkout_url,
        note: cart.note,
        total_quantity: cart.total_quantity,
        attributes: cart.attributes.into_iter().map(convert_attribute).collect(),
        buyer_identity: cart.buyer_identity.map(|b| CartBuyerIdentity {
            email: b.email,
            phone: b.phone,
            country_code: b.country_code,
            customer: b.customer.map(|c| CartCustomer {
                id: c.id,
                email: c.email,
            }),
        }),
        cost: CartCost {
            subtotal: convert_money(cart.cost.subtotal_amount),
            total: convert_money(cart.cost.total_amount),
            total_tax: cart.cost.total_tax_amount.map(convert_money),
        },
        discount_codes: cart
            .discount_codes
            .into_iter()
            .map(|d| CartDiscountCode {
                code: d.code,
                applicable: d.applicable,
            })
            .collect(),
        lines: cart
            .lines
            .nodes
            .into_iter()
            .map(convert_cart_line)
            .collect(),
    }
}

fn convert_cart_line(line: wire::CartLineData) -> CartLine {
    CartLine {
        id: line.id,
        quantity: line.quantity,
        attributes: line.attributes.into_iter().map(convert_attribute).collect(),
        cost: CartLineCost {
            amount_per_quantity: convert_money(line.cost.amount_per_quantity),
            total_amount: convert_money(line.cost.total_amount),
        },
        merchandise: CartMerchandise {
            id: line.merchandise.id,
            title: line.merchandise.title,
            price: convert_money(line.merchandise.price),
            selected_options: line
                .merchandise
                .selected_options
                .into_iter()
                .map(convert_selected_option)
                .collect(),
            image: line.merchandise.image.map(convert_image),
            product: CartMerchandiseProduct {
                id: line.merchandise.product.id,
                handle: line.merchandise.product.handle,
                title: line.merchandise.product.title,
            },
        },
    }
}

pub fn convert_mutation(payload: wire::CartMutationData) -> CartMutation {
    CartMutation {
        cart: payload.cart.map(convert_cart),
        user_errors: payload.user_errors,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const CART_JSON: &str = r#"{
        "id": "gid://shopify/Cart/abc",
        "checkoutUrl": "https://checkout.example/abc",
        "note": null,
        "totalQuantity": 3,
        "attributes": [{"key": "gift", "value": "true"}],
        "buyerIdentity": {
            "email": "shopper@example.net",
            "phone": null,
            "countryCode": "US",
            "customer": null
        },
        "cost": {
            "subtotalAmount": {"amount": "30.0", "currencyCode": "USD"},
            "totalAmount": {"amount": "32.4", "currencyCode": "USD"},
            "totalTaxAmount": {"amount": "2.4", "currencyCode": "USD"}
        },
        "discountCodes": [{"code": "WELCOME10", "applicable": true}],
        "lines": {
            "nodes": [{
                "id": "gid://shopify/CartLine/1",
                "quantity": 3,
                "attributes": [],
                "cost": {
                    "amountPerQuantity": {"amount": "10.0", "currencyCode": "USD"},
                    "totalAmount": {"amount": "30.0", "currencyCode": "USD"}
                },
                "merchandise": {
                    "id": "gid://shopify/ProductVariant/11",
                    "title": "Large",
                    "price": {"amount": "10.0", "currencyCode": "USD"},
                    "selectedOptions": [{"name": "Size", "value": "Large"}],
                    "image": null,
                    "product": {
                        "id": "gid://shopify/Product/1",
                        "handle": "sea-salt-soap",
                        "title": "Sea Salt Soap"
                    }
                }
            }]
        }
    }"#;

    #[test]
    fn test_convert_cart_from_wire_json() {
        let data: wire::CartData = serde_json::from_str(CART_JSON).unwrap();
        let cart = convert_cart(data);

        assert_eq!(cart.id, "gid://shopify/Cart/abc");
        assert_eq!(cart.total_quantity, 3);
        assert_eq!(cart.cost.subtotal, Money::new("30.0", "USD"));
        assert_eq!(cart.discount_codes.len(), 1);
        assert_eq!(cart.lines.len(), 1);
        let line = cart.lines.first().unwrap();
        assert_eq!(line.merchandise.id, "gid://shopify/ProductVariant/11");
        assert_eq!(line.merchandise.product.handle, "sea-salt-soap");
    }

    #[test]
    fn test_convert_mutation_with_user_errors() {
        let json = r#"{
            "cart": null,
            "userErrors": [{"code": "INVALID", "field": ["discountCodes"], "message": "nope"}]
        }"#;
        let data: wire::CartMutationData = serde_json::from_str(json).unwrap();
        let mutation = convert_mutation(data);

        assert!(mutation.cart.is_none());
        assert_eq!(mutation.user_errors.len(), 1);
        assert_eq!(mutation.user_errors.first().unwrap().message, "nope");
    }

    #[test]
    fn test_convert_product_from_wire_json() {
        let json = r#"{
            "id": "gid://shopify/Product/1",
            "handle": "sea-salt-soap",
            "title": "Sea Salt Soap",
            "description": "Soap.",
            "availableForSale": true,
            "tags": ["soap", "no-protection"],
            "options": [{"name": "Size", "values": ["Small", "Large"]}],
            "variants": {"nodes": [{
                "id": "gid://shopify/ProductVariant/11",
                "title": "Small",
                "availableForSale": true,
                "price": {"amount": "8.0", "currencyCode": "USD"},
                "compareAtPrice": null,
                "selectedOptions": [{"name": "Size", "value": "Small"}],
                "image": null
            }]}
        }"#;
        let data: wire::ProductData = serde_json::from_str(json).unwrap();
        let product = convert_product(data);

        assert_eq!(product.handle, "sea-salt-soap");
        assert_eq!(product.options.len(), 1);
        assert_eq!(product.variants.len(), 1);
        assert!(product.tags.contains(&"no-protection".to_string()));
    }
}
