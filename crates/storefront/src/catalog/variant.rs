//! Variant resolution from option selections.
//!
//! A product page carries the shopper's in-progress option choices in its
//! URL query string, one `name=value` pair per product option. Resolution
//! deterministically maps that (possibly partial, possibly nonsensical)
//! selection onto exactly one variant:
//!
//! 1. If every option has a single value, return the sole variant without
//!    waiting for any selection.
//! 2. Exact match on the complete selection.
//! 3. Fill missing option names from the first variant's values and retry.
//! 4. Fall back to the first available-for-sale variant, else the first
//!    variant in declaration order.
//!
//! The ordering is load-bearing: it decides which variant renders as
//! selected on first paint versus after a shopper action.

use std::collections::HashMap;

use tracing::debug;

use crate::commerce::{Product, ProductVariant};

/// Option name → chosen value, rebuilt from the URL on every request.
pub type Selection = HashMap<String, String>;

/// Build a selection from raw query parameters.
///
/// Only parameters naming one of the product's options are kept; tracking
/// parameters and other noise are dropped.
#[must_use]
pub fn selection_from_params(product: &Product, params: &HashMap<String, String>) -> Selection {
    product
        .options
        .iter()
        .filter_map(|option| {
            params
                .get(&option.name)
                .map(|value| (option.name.clone(), value.clone()))
        })
        .collect()
}

/// Resolve a selection to exactly one variant.
///
/// Returns `None` only for a product with no variants at all.
#[must_use]
pub fn resolve_variant<'a>(product: &'a Product, selection: &Selection) -> Option<&'a ProductVariant> {
    let first = product.variants.first()?;

    // A product where no option offers a real choice has exactly one
    // meaningful variant; selection state is irrelevant.
    if product
        .options
        .iter()
        .all(|option| option.values.len() == 1)
    {
        return Some(first);
    }

    if let Some(variant) = exact_match(product, selection) {
        return Some(variant);
    }

    // Partial selection: borrow the first variant's values for the missing
    // option names and retry.
    if selection.len() < product.options.len() {
        let mut filled = selection.clone();
        for option in &first.selected_options {
            filled
                .entry(option.name.clone())
                .or_insert_with(|| option.value.clone());
        }
        if let Some(variant) = exact_match(product, &filled) {
            return Some(variant);
        }
    }

    debug!(
        handle = %product.handle,
        "No variant matches the selection, falling back"
    );

    product
        .variants
        .iter()
        .find(|variant| variant.available_for_sale)
        .or(Some(first))
}

/// Find the variant whose selected options agree with the selection on
/// every option name, requiring the selection to cover all of them.
fn exact_match<'a>(product: &'a Product, selection: &Selection) -> Option<&'a ProductVariant> {
    if selection.len() < product.options.len() {
        return None;
    }
    product.variants.iter().find(|variant| {
        variant.selected_options.iter().all(|option| {
            selection
                .get(&option.name)
                .is_some_and(|value| *value == option.value)
        })
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::commerce::{ProductOption, types::Money};

    use super::*;

    fn variant(id: &str, options: &[(&str, &str)], available: bool) -> ProductVariant {
        ProductVariant {
            id: id.to_string(),
            title: options
                .iter()
                .map(|(_, v)| (*v).to_string())
                .collect::<Vec<_>>()
                .join(" / "),
            available_for_sale: available,
            price: Money::new("10.00", "USD"),
            compare_at_price: None,
            selected_options: options
                .iter()
                .map(|(name, value)| crate::commerce::SelectedOption {
                    name: (*name).to_string(),
                    value: (*value).to_string(),
                })
                .collect(),
            image: None,
        }
    }

    fn product(options: Vec<(&str, Vec<&str>)>, variants: Vec<ProductVariant>) -> Product {
        Product {
            id: "gid://shopify/Product/1".to_string(),
            handle: "sea-salt-soap".to_string(),
            title: "Sea Salt Soap".to_string(),
            description: String::new(),
            available_for_sale: true,
            tags: vec![],
            options: options
                .into_iter()
                .map(|(name, values)| ProductOption {
                    name: name.to_string(),
                    values: values.into_iter().map(String::from).collect(),
                })
                .collect(),
            variants,
        }
    }

    fn two_option_product() -> Product {
        product(
            vec![
                ("Size", vec!["Small", "Large"]),
                ("Scent", vec!["Citrus", "Pine"]),
            ],
            vec![
                variant("v1", &[("Size", "Small"), ("Scent", "Citrus")], false),
                variant("v2", &[("Size", "Small"), ("Scent", "Pine")], true),
                variant("v3", &[("Size", "Large"), ("Scent", "Citrus")], true),
                variant("v4", &[("Size", "Large"), ("Scent", "Pine")], true),
            ],
        )
    }

    fn selection(pairs: &[(&str, &str)]) -> Selection {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_single_value_options_return_sole_variant_for_any_selection() {
        let product = product(
            vec![("Title", vec!["Default Title"])],
            vec![variant("v1", &[("Title", "Default Title")], true)],
        );

        assert_eq!(resolve_variant(&product, &Selection::new()).unwrap().id, "v1");
        assert_eq!(
            resolve_variant(&product, &selection(&[("Title", "Nonsense")]))
                .unwrap()
                .id,
            "v1"
        );
    }

    #[test]
    fn test_exact_match_wins() {
        let product = two_option_product();
        let resolved = resolve_variant(
            &product,
            &selection(&[("Size", "Large"), ("Scent", "Pine")]),
        );
        assert_eq!(resolved.unwrap().id, "v4");
    }

    #[test]
    fn test_partial_selection_fills_from_first_variant() {
        let product = two_option_product();

        // Missing Scent fills with the first variant's "Citrus"
        let resolved = resolve_variant(&product, &selection(&[("Size", "Large")]));
        assert_eq!(resolved.unwrap().id, "v3");
    }

    #[test]
    fn test_no_match_falls_back_to_first_available() {
        let product = two_option_product();

        // Value outside the option's domain matches nothing; v1 is not
        // available, so v2 wins.
        let resolved = resolve_variant(
            &product,
            &selection(&[("Size", "Gigantic"), ("Scent", "Pine")]),
        );
        assert_eq!(resolved.unwrap().id, "v2");
    }

    #[test]
    fn test_nothing_available_falls_back_to_first_variant() {
        let product = product(
            vec![("Size", vec!["Small", "Large"])],
            vec![
                variant("v1", &[("Size", "Small")], false),
                variant("v2", &[("Size", "Large")], false),
            ],
        );
        let resolved = resolve_variant(&product, &selection(&[("Size", "Gigantic")]));
        assert_eq!(resolved.unwrap().id, "v1");
    }

    #[test]
    fn test_no_variants_resolves_to_none() {
        let product = product(vec![("Size", vec!["Small"])], vec![]);
        assert!(resolve_variant(&product, &Selection::new()).is_none());
    }

    #[test]
    fn test_selection_from_params_drops_unknown_names() {
        let product = two_option_product();
        let params: HashMap<String, String> = [
            ("Size".to_string(), "Large".to_string()),
            ("utm_source".to_string(), "newsletter".to_string()),
        ]
        .into();

        let selection = selection_from_params(&product, &params);
        assert_eq!(selection.len(), 1);
        assert_eq!(selection.get("Size").map(String::as_str), Some("Large"));
    }
}
