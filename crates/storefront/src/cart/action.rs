//! Typed cart actions and mutation planning.
//!
//! A submission arrives as form fields: a required `action` discriminator,
//! an `inputs` field carrying a JSON payload shaped to that action, and a
//! few optional extras (`redirect_to`, `protect`, `product_handle`).
//! [`CartAction::parse`] turns the discriminator plus payload into an
//! exhaustive enum; from there [`plan`] decides the single remote mutation
//! to run. An unknown or missing discriminator fails at parse time and
//! never produces a plan.

use serde::Deserialize;
use thiserror::Error;

use crate::commerce::{
    AttributeInput, BuyerIdentityInput, CartLineInput, CartLineUpdateInput, CartMutation,
    CommerceClient, CommerceError,
};

/// Raw form fields of a cart submission.
#[derive(Debug, Deserialize)]
pub struct CartActionForm {
    /// Action discriminator. Absence is a request error, not a default.
    pub action: Option<String>,
    /// JSON payload shaped to the action.
    #[serde(default)]
    pub inputs: Option<String>,
    /// Same-origin relative redirect target.
    #[serde(default, alias = "redirectTo")]
    pub redirect_to: Option<String>,
    /// Shipping protection opt-out. The template pairs the checkbox with a
    /// hidden `protect=0` input, so an unchecked box still submits `0`; a
    /// checked box overrides it with `1`. An absent field means the form
    /// carries no protection control at all and defaults to opted in.
    #[serde(default)]
    pub protect: Option<String>,
    /// Handle of the product being added, for the protection exclusion tag.
    #[serde(default)]
    pub product_handle: Option<String>,
}

impl CartActionForm {
    /// Whether the shopper left shipping protection enabled.
    ///
    /// Only an explicit `0`/`false`/`off` opts out. A bare checkbox that
    /// omits its field when unchecked would read as opted in, which is why
    /// the form must carry the hidden `protect=0` fallback input.
    #[must_use]
    pub fn protection_opted_in(&self) -> bool {
        !matches!(self.protect.as_deref(), Some("0" | "false" | "off"))
    }
}

/// Failure to turn a form submission into a [`CartAction`].
///
/// All of these abort the request before any remote call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("missing action discriminator")]
    MissingAction,

    #[error("unknown action: {0}")]
    UnknownAction(String),

    #[error("invalid inputs for {action}: {message}")]
    InvalidInputs { action: String, message: String },
}

// Payload shapes for the `inputs` JSON, per action.

#[derive(Debug, Deserialize)]
struct LinesAddInputs {
    lines: Vec<CartLineInput>,
}

#[derive(Debug, Deserialize)]
struct LinesUpdateInputs {
    lines: Vec<CartLineUpdateInput>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LinesRemoveInputs {
    line_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DiscountCodesUpdateInputs {
    /// Newly entered code, applied first.
    #[serde(default)]
    discount_code: Option<String>,
    /// Codes already on the cart. The remote update is a full replace, so
    /// any code not re-sent here is dropped.
    #[serde(default)]
    discount_codes: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct AttributesUpdateInputs {
    attributes: Vec<AttributeInput>,
}

/// One of the six cart mutations, with its typed payload.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Append lines; quantities merge additively for existing merchandise.
    LinesAdd { lines: Vec<CartLineInput> },
    /// Set line quantities; quantity 0 removes the line.
    LinesUpdate { lines: Vec<CartLineUpdateInput> },
    /// Delete lines by ID.
    LinesRemove { line_ids: Vec<String> },
    /// Replace the discount code set with `new_code` (first) plus
    /// `applied_codes`.
    DiscountCodesUpdate {
        new_code: Option<String>,
        applied_codes: Vec<String>,
    },
    /// Merge buyer identity fields.
    BuyerIdentityUpdate { buyer_identity: BuyerIdentityInput },
    /// Replace cart attributes.
    AttributesUpdate { attributes: Vec<AttributeInput> },
}

impl CartAction {
    /// Parse the `action` discriminator and `inputs` payload.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError`] when the discriminator is missing or
    /// unknown, or when the payload does not deserialize to the shape the
    /// action requires.
    pub fn parse(action: Option<&str>, inputs: Option<&str>) -> Result<Self, ActionError> {
        let action = match action {
            Some(a) if !a.is_empty() => a,
            _ => return Err(ActionError::MissingAction),
        };
        let inputs = inputs.unwrap_or("{}");

        fn payload<'a, T: Deserialize<'a>>(action: &str, inputs: &'a str) -> Result<T, ActionError> {
            serde_json::from_str(inputs).map_err(|e| ActionError::InvalidInputs {
                action: action.to_string(),
                message: e.to_string(),
            })
        }

        match action {
            "LinesAdd" => {
                let p: LinesAddInputs = payload(action, inputs)?;
                if p.lines.is_empty() {
                    return Err(ActionError::InvalidInputs {
                        action: action.to_string(),
                        message: "lines must not be empty".to_string(),
                    });
                }
                if p.lines.iter().any(|line| line.quantity < 1) {
                    return Err(ActionError::InvalidInputs {
                        action: action.to_string(),
                        message: "quantity must be at least 1".to_string(),
                    });
                }
                Ok(Self::LinesAdd { lines: p.lines })
            }
            "LinesUpdate" => {
                let p: LinesUpdateInputs = payload(action, inputs)?;
                if p.lines.iter().any(|line| line.quantity.is_some_and(|q| q < 0)) {
                    return Err(ActionError::InvalidInputs {
                        action: action.to_string(),
                        message: "quantity must not be negative".to_string(),
                    });
                }
                Ok(Self::LinesUpdate { lines: p.lines })
            }
            "LinesRemove" => {
                let p: LinesRemoveInputs = payload(action, inputs)?;
                Ok(Self::LinesRemove { line_ids: p.line_ids })
            }
            "DiscountCodesUpdate" => {
                let p: DiscountCodesUpdateInputs = payload(action, inputs)?;
                Ok(Self::DiscountCodesUpdate {
                    new_code: p.discount_code.filter(|c| !c.is_empty()),
                    applied_codes: p.discount_codes,
                })
            }
            "BuyerIdentityUpdate" => {
                let buyer_identity: BuyerIdentityInput = payload(action, inputs)?;
                Ok(Self::BuyerIdentityUpdate { buyer_identity })
            }
            "AttributesUpdateInput" => {
                let p: AttributesUpdateInputs = payload(action, inputs)?;
                Ok(Self::AttributesUpdate { attributes: p.attributes })
            }
            other => Err(ActionError::UnknownAction(other.to_string())),
        }
    }
}

/// The single remote mutation a submission resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationPlan {
    Create {
        lines: Vec<CartLineInput>,
    },
    LinesAdd {
        cart_id: String,
        lines: Vec<CartLineInput>,
    },
    LinesUpdate {
        cart_id: String,
        lines: Vec<CartLineUpdateInput>,
    },
    LinesRemove {
        cart_id: String,
        line_ids: Vec<String>,
    },
    DiscountCodesUpdate {
        cart_id: String,
        discount_codes: Vec<String>,
    },
    BuyerIdentityUpdate {
        cart_id: String,
        buyer_identity: BuyerIdentityInput,
    },
    AttributesUpdate {
        cart_id: String,
        attributes: Vec<AttributeInput>,
    },
}

/// Result of planning: either one remote mutation, or nothing to run.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome {
    /// Run exactly this mutation.
    Remote(MutationPlan),
    /// No cart exists and the action cannot create one; respond without a
    /// remote call.
    NoCart,
}

/// Map a parsed action onto the one mutation to run.
///
/// `LinesAdd` without a cart creates one lazily; every other action needs
/// an existing cart. `BuyerIdentityUpdate` picks up the session's customer
/// token when the payload does not carry one.
#[must_use]
pub fn plan(
    action: CartAction,
    cart_id: Option<&str>,
    customer_token: Option<&str>,
) -> PlanOutcome {
    match (action, cart_id) {
        (CartAction::LinesAdd { lines }, None) => PlanOutcome::Remote(MutationPlan::Create { lines }),
        (CartAction::LinesAdd { lines }, Some(cart_id)) => {
            PlanOutcome::Remote(MutationPlan::LinesAdd {
                cart_id: cart_id.to_string(),
                lines,
            })
        }
        (_, None) => PlanOutcome::NoCart,
        (CartAction::LinesUpdate { lines }, Some(cart_id)) => {
            PlanOutcome::Remote(MutationPlan::LinesUpdate {
                cart_id: cart_id.to_string(),
                lines,
            })
        }
        (CartAction::LinesRemove { line_ids }, Some(cart_id)) => {
            PlanOutcome::Remote(MutationPlan::LinesRemove {
                cart_id: cart_id.to_string(),
                line_ids,
            })
        }
        (
            CartAction::DiscountCodesUpdate {
                new_code,
                applied_codes,
            },
            Some(cart_id),
        ) => {
            // Full replace: the new code goes first, already-applied codes
            // must be re-sent or the remote drops them.
            let mut discount_codes = Vec::with_capacity(applied_codes.len() + 1);
            if let Some(code) = new_code {
                discount_codes.push(code);
            }
            for code in applied_codes {
                if !discount_codes.contains(&code) {
                    discount_codes.push(code);
                }
            }
            PlanOutcome::Remote(MutationPlan::DiscountCodesUpdate {
                cart_id: cart_id.to_string(),
                discount_codes,
            })
        }
        (CartAction::BuyerIdentityUpdate { mut buyer_identity }, Some(cart_id)) => {
            if buyer_identity.customer_access_token.is_none() {
                buyer_identity.customer_access_token = customer_token.map(String::from);
            }
            PlanOutcome::Remote(MutationPlan::BuyerIdentityUpdate {
                cart_id: cart_id.to_string(),
                buyer_identity,
            })
        }
        (CartAction::AttributesUpdate { attributes }, Some(cart_id)) => {
            PlanOutcome::Remote(MutationPlan::AttributesUpdate {
                cart_id: cart_id.to_string(),
                attributes,
            })
        }
    }
}

impl MutationPlan {
    /// Extend an add plan's lines in place, keeping everything in the same
    /// mutation call. Other plan kinds are unaffected.
    pub fn extend_add_lines(&mut self, extra: impl IntoIterator<Item = CartLineInput>) {
        match self {
            Self::Create { lines } | Self::LinesAdd { lines, .. } => lines.extend(extra),
            _ => {}
        }
    }

    /// Lines about to be added, when this is an add plan.
    #[must_use]
    pub fn add_lines(&self) -> Option<&[CartLineInput]> {
        match self {
            Self::Create { lines } | Self::LinesAdd { lines, .. } => Some(lines),
            _ => None,
        }
    }

    /// Execute the plan as a single commerce API call.
    ///
    /// # Errors
    ///
    /// Returns the commerce client's transport or GraphQL error. Remote
    /// user errors travel inside the returned [`CartMutation`].
    pub async fn execute(self, commerce: &CommerceClient) -> Result<CartMutation, CommerceError> {
        match self {
            Self::Create { lines } => commerce.cart_create(lines).await,
            Self::LinesAdd { cart_id, lines } => commerce.cart_lines_add(&cart_id, lines).await,
            Self::LinesUpdate { cart_id, lines } => {
                commerce.cart_lines_update(&cart_id, lines).await
            }
            Self::LinesRemove { cart_id, line_ids } => {
                commerce.cart_lines_remove(&cart_id, line_ids).await
            }
            Self::DiscountCodesUpdate {
                cart_id,
                discount_codes,
            } => {
                commerce
                    .cart_discount_codes_update(&cart_id, discount_codes)
                    .await
            }
            Self::BuyerIdentityUpdate {
                cart_id,
                buyer_identity,
            } => {
                commerce
                    .cart_buyer_identity_update(&cart_id, buyer_identity)
                    .await
            }
            Self::AttributesUpdate {
                cart_id,
                attributes,
            } => commerce.cart_attributes_update(&cart_id, attributes).await,
        }
    }
}

/// Validate a redirect target as a same-origin relative path.
///
/// Anything absolute, protocol-relative, or backslash-bearing is rejected
/// and the caller falls back to a normal data response.
#[must_use]
pub fn local_redirect_target(raw: Option<&str>) -> Option<&str> {
    let target = raw?;
    if target.starts_with('/') && !target.starts_with("//") && !target.contains('\\') {
        Some(target)
    } else {
        None
    }
}
