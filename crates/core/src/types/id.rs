//! Global-ID handling for commerce API identifiers.
//!
//! The commerce API issues opaque identifiers of the form
//! `gid://{namespace}/{Resource}/{id}`. [`Gid`] validates that shape while
//! keeping the original string intact, since identifiers must be echoed back
//! verbatim in mutations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A validated global identifier (e.g. `gid://shopify/ProductVariant/123`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gid(String);

/// Errors from parsing a global identifier.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GidError {
    /// The value does not start with the `gid://` scheme.
    #[error("not a gid: {0:?}")]
    InvalidScheme(String),
    /// The value is missing one of namespace, resource, or id.
    #[error("malformed gid: {0:?}")]
    Malformed(String),
}

impl Gid {
    /// Parse and validate a global identifier.
    ///
    /// # Errors
    ///
    /// Returns `GidError` if the value is not of the form
    /// `gid://{namespace}/{Resource}/{id}` with all three parts non-empty.
    pub fn parse(value: &str) -> Result<Self, GidError> {
        let rest = value
            .strip_prefix("gid://")
            .ok_or_else(|| GidError::InvalidScheme(value.to_string()))?;

        let mut parts = rest.splitn(3, '/');
        let namespace = parts.next().unwrap_or_default();
        let resource = parts.next().unwrap_or_default();
        let id = parts.next().unwrap_or_default();

        if namespace.is_empty() || resource.is_empty() || id.is_empty() {
            return Err(GidError::Malformed(value.to_string()));
        }

        Ok(Self(value.to_string()))
    }

    /// The resource type segment (e.g. "ProductVariant").
    #[must_use]
    pub fn resource(&self) -> &str {
        self.segments().1
    }

    /// The trailing id segment. May carry query parameters the API appends;
    /// those are preserved verbatim.
    #[must_use]
    pub fn id(&self) -> &str {
        self.segments().2
    }

    /// The full identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this identifier names a product variant.
    #[must_use]
    pub fn is_product_variant(&self) -> bool {
        self.resource() == "ProductVariant"
    }

    fn segments(&self) -> (&str, &str, &str) {
        let rest = self.0.strip_prefix("gid://").unwrap_or(&self.0);
        let mut parts = rest.splitn(3, '/');
        (
            parts.next().unwrap_or_default(),
            parts.next().unwrap_or_default(),
            parts.next().unwrap_or_default(),
        )
    }
}

impl std::fmt::Display for Gid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Gid {
    type Err = GidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_gid() {
        let gid = Gid::parse("gid://shopify/ProductVariant/43210").unwrap();
        assert_eq!(gid.resource(), "ProductVariant");
        assert_eq!(gid.id(), "43210");
        assert!(gid.is_product_variant());
    }

    #[test]
    fn test_parse_cart_gid() {
        let gid = Gid::parse("gid://shopify/Cart/abc123?key=xyz").unwrap();
        assert_eq!(gid.resource(), "Cart");
        assert!(!gid.is_product_variant());
    }

    #[test]
    fn test_parse_rejects_plain_string() {
        assert_eq!(
            Gid::parse("43210"),
            Err(GidError::InvalidScheme("43210".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_missing_segments() {
        assert!(matches!(
            Gid::parse("gid://shopify/ProductVariant"),
            Err(GidError::Malformed(_))
        ));
        assert!(matches!(Gid::parse("gid://"), Err(GidError::Malformed(_))));
    }

    #[test]
    fn test_display_is_verbatim() {
        let raw = "gid://shopify/ProductVariant/999";
        assert_eq!(Gid::parse(raw).unwrap().to_string(), raw);
    }
}
