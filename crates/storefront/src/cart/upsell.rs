//! Shipping protection line injection.
//!
//! Before an add-to-cart mutation goes out, the injector decides whether to
//! append the fixed-price protection variant as a second line of the SAME
//! mutation. A follow-up call is never used: a partial failure must not
//! leave the primary item in the cart with the protection line missing.

use tracing::debug;

use crate::commerce::{Cart, CartLineInput};
use crate::config::UpsellConfig;

/// Decides whether to append the protection line to an outbound add.
///
/// Constructed once from configuration; disabled entirely when no
/// protection variant is configured.
#[derive(Clone)]
pub struct UpsellInjector {
    config: Option<UpsellConfig>,
}

impl UpsellInjector {
    #[must_use]
    pub fn new(config: Option<UpsellConfig>) -> Self {
        Self { config }
    }

    /// The protection variant's merchandise ID, when configured.
    #[must_use]
    pub fn variant_id(&self) -> Option<&str> {
        self.config.as_ref().map(|c| c.variant_id.as_str())
    }

    /// Whether the given lines consist solely of the protection variant.
    ///
    /// A protection-only add must not auto-open the cart drawer.
    #[must_use]
    pub fn is_protection_only(&self, lines: &[CartLineInput]) -> bool {
        match &self.config {
            Some(config) => {
                !lines.is_empty()
                    && lines
                        .iter()
                        .all(|line| line.merchandise_id == config.variant_id)
            }
            None => false,
        }
    }

    /// Decide whether the protection line belongs on this add.
    ///
    /// Never injects when: the shopper opted out, the protection line is
    /// already in the cart or in the outbound lines, or the product being
    /// added carries the exclusion tag.
    #[must_use]
    pub fn should_inject(
        &self,
        lines: &[CartLineInput],
        cart: Option<&Cart>,
        product_tags: &[String],
        opted_in: bool,
    ) -> bool {
        let Some(config) = &self.config else {
            return false;
        };
        if !opted_in {
            return false;
        }
        if lines
            .iter()
            .any(|line| line.merchandise_id == config.variant_id)
        {
            return false;
        }
        if cart.is_some_and(|cart| cart.contains_merchandise(&config.variant_id)) {
            debug!("Protection line already in cart, skipping injection");
            return false;
        }
        if product_tags.iter().any(|tag| *tag == config.exclusion_tag) {
            debug!("Product carries the exclusion tag, skipping injection");
            return false;
        }
        true
    }

    /// Append the protection line when [`Self::should_inject`] says so.
    ///
    /// Returns whether a line was appended.
    pub fn inject(
        &self,
        lines: &mut Vec<CartLineInput>,
        cart: Option<&Cart>,
        product_tags: &[String],
        opted_in: bool,
    ) -> bool {
        if !self.should_inject(lines, cart, product_tags, opted_in) {
            return false;
        }
        let Some(config) = &self.config else {
            return false;
        };
        lines.push(CartLineInput {
            merchandise_id: config.variant_id.clone(),
            quantity: 1,
            attributes: None,
        });
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::commerce::types::fixtures::sample_cart;

    use super::*;

    const PROTECTION_VARIANT: &str = "gid://shopify/ProductVariant/777";

    fn injector() -> UpsellInjector {
        UpsellInjector::new(Some(UpsellConfig {
            variant_id: PROTECTION_VARIANT.to_string(),
            exclusion_tag: "no-protection".to_string(),
        }))
    }

    fn primary_line() -> CartLineInput {
        CartLineInput {
            merchandise_id: "gid://shopify/ProductVariant/1".to_string(),
            quantity: 1,
            attributes: None,
        }
    }

    #[test]
    fn test_injects_second_line_when_eligible() {
        let mut lines = vec![primary_line()];
        let injected = injector().inject(&mut lines, Some(&sample_cart()), &[], true);

        assert!(injected);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines.last().unwrap().merchandise_id, PROTECTION_VARIANT);
        assert_eq!(lines.last().unwrap().quantity, 1);
    }

    #[test]
    fn test_never_duplicates_protection_already_in_cart() {
        let mut cart = sample_cart();
        cart.lines
            .first_mut()
            .unwrap()
            .merchandise
            .id = PROTECTION_VARIANT.to_string();

        let mut lines = vec![primary_line()];
        assert!(!injector().inject(&mut lines, Some(&cart), &[], true));
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_exclusion_tag_always_wins() {
        let tags = vec!["soap".to_string(), "no-protection".to_string()];
        let mut lines = vec![primary_line()];
        assert!(!injector().inject(&mut lines, None, &tags, true));
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_opt_out_skips_injection() {
        let mut lines = vec![primary_line()];
        assert!(!injector().inject(&mut lines, None, &[], false));
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_no_injection_when_already_in_outbound_lines() {
        let mut lines = vec![
            primary_line(),
            CartLineInput {
                merchandise_id: PROTECTION_VARIANT.to_string(),
                quantity: 1,
                attributes: None,
            },
        ];
        assert!(!injector().inject(&mut lines, None, &[], true));
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_disabled_without_config() {
        let disabled = UpsellInjector::new(None);
        let mut lines = vec![primary_line()];
        assert!(!disabled.inject(&mut lines, None, &[], true));
        assert!(!disabled.is_protection_only(&lines));
    }

    #[test]
    fn test_is_protection_only() {
        let injector = injector();
        let protection = vec![CartLineInput {
            merchandise_id: PROTECTION_VARIANT.to_string(),
            quantity: 1,
            attributes: None,
        }];
        assert!(injector.is_protection_only(&protection));
        assert!(!injector.is_protection_only(&[primary_line()]));
        assert!(!injector.is_protection_only(&[]));
    }
}
