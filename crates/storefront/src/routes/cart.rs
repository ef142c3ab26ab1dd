//! Cart route handlers.
//!
//! `POST /cart` is the single dispatch endpoint: the form's `action`
//! discriminator selects one of six remote mutations. Every successful
//! mutation writes the returned cart ID back to the signed session cookie,
//! since the remote API may issue a new identifier at any time. Responses
//! carry `HX-Trigger` events so page fragments (count badge, drawer) can
//! refresh themselves.

use axum::{
    Form, Json,
    extract::State,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use axum_extra::extract::SignedCookieJar;
use serde::Serialize;
use tracing::instrument;

use crate::cart::action::{self, CartAction, CartActionForm, MutationPlan, PlanOutcome};
use crate::cart::sync::CartSync;
use crate::cart::upsell::UpsellInjector;
use crate::commerce::{Cart, CartMutation};
use crate::error::{AppError, add_breadcrumb};
use crate::session;
use crate::state::AppState;

/// HTMX event fired after any cart change.
const EVENT_CART_UPDATED: &str = "cart-updated";
/// HTMX event that opens the cart drawer.
const EVENT_DRAWER_OPEN: &str = "cart-drawer-open";

/// Data response for cart endpoints.
///
/// Mutation failures ride alongside the last-known cart snapshot instead
/// of becoming HTTP errors, so the client keeps rendering a consistent
/// cart.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub cart: Option<Cart>,
    pub errors: Vec<String>,
}

impl CartResponse {
    fn empty() -> Self {
        Self {
            cart: None,
            errors: Vec::new(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            cart: None,
            errors: vec![message.into()],
        }
    }
}

impl From<CartMutation> for CartResponse {
    fn from(mutation: CartMutation) -> Self {
        Self {
            cart: mutation.cart,
            errors: mutation
                .user_errors
                .into_iter()
                .map(|error| error.message)
                .collect(),
        }
    }
}

/// Cart count badge data.
#[derive(Debug, Serialize)]
pub struct CartCountResponse {
    pub count: i64,
}

/// Dispatch a cart mutation (HTMX).
///
/// Exactly one remote mutation per request. A missing or unknown `action`
/// is a 400 and provably makes no remote call; a valid same-origin
/// `redirect_to` turns the success response into a 303.
#[instrument(skip(state, jar, form), fields(action = form.action.as_deref().unwrap_or("<missing>")))]
pub async fn dispatch(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<CartActionForm>,
) -> Result<Response, AppError> {
    let parsed = CartAction::parse(form.action.as_deref(), form.inputs.as_deref())
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    add_breadcrumb(
        "cart",
        "Cart action dispatched",
        Some(&[("action", form.action.as_deref().unwrap_or(""))]),
    );

    let cart_id = session::cart_id(&jar);
    let customer_token = session::customer_token(&jar);

    let is_lines_add = matches!(parsed, CartAction::LinesAdd { .. });
    let outcome = action::plan(parsed, cart_id.as_deref(), customer_token.as_deref());

    let mut plan = match outcome {
        PlanOutcome::Remote(plan) => plan,
        PlanOutcome::NoCart => {
            // Nothing to mutate; respond without touching the remote API
            return Ok((jar, Json(CartResponse::error("No cart in session"))).into_response());
        }
    };

    if is_lines_add {
        enrich_with_protection(&state, &mut plan, &form, cart_id.as_deref()).await;
    }

    let protection_only = plan
        .add_lines()
        .is_some_and(|lines| state.upsell().is_protection_only(lines));

    // Track the submission through its lifecycle for the drawer decision
    let mut sync = CartSync::new();
    let (submission, _) = sync.begin(protection_only);

    let result = plan.execute(state.commerce()).await;
    sync.settle(submission, result.is_ok());

    let response = match result {
        Ok(mutation) => CartResponse::from(mutation),
        Err(e) => {
            tracing::warn!(error = %e, "Cart mutation failed");
            sentry::capture_error(&e);
            CartResponse::error(e.to_string())
        }
    };

    let jar = persist_cart_id(jar, response.cart.as_ref(), state.secure_cookies());

    let succeeded = response.cart.is_some() && response.errors.is_empty();

    if succeeded && let Some(target) = action::local_redirect_target(form.redirect_to.as_deref()) {
        return Ok((jar, Redirect::to(target)).into_response());
    }

    let mut events = vec![EVENT_CART_UPDATED];
    if is_lines_add && succeeded && sync.drawer_open() {
        events.push(EVENT_DRAWER_OPEN);
    }

    Ok((
        jar,
        AppendHeaders([("HX-Trigger", events.join(", "))]),
        Json(response),
    )
        .into_response())
}

/// Write the mutation's cart ID back to the session.
///
/// The remote API may issue a new identifier on any mutation (always on
/// creation); the snapshot's ID is the one that counts going forward.
fn persist_cart_id(jar: SignedCookieJar, cart: Option<&Cart>, secure: bool) -> SignedCookieJar {
    match cart {
        Some(cart) => session::with_cart_id(jar, &cart.id, secure),
        None => jar,
    }
}

/// Fetch the decision inputs for the protection line and extend the add
/// plan in place, so the injected line rides in the same mutation call.
///
/// Fetch failures skip injection rather than failing the add.
async fn enrich_with_protection(
    state: &AppState,
    plan: &mut MutationPlan,
    form: &CartActionForm,
    cart_id: Option<&str>,
) {
    if plan.add_lines().is_none() {
        return;
    }

    let cart = match cart_id {
        Some(cart_id) => match state.commerce().cart(cart_id).await {
            Ok(cart) => Some(cart),
            Err(e) => {
                tracing::warn!(error = %e, "Cart fetch for protection decision failed");
                return;
            }
        },
        None => None,
    };

    let product_tags = match form.product_handle.as_deref() {
        Some(handle) => match state.commerce().product_by_handle(handle).await {
            Ok(product) => product.tags.clone(),
            Err(e) => {
                tracing::warn!(error = %e, "Product fetch for protection decision failed");
                return;
            }
        },
        None => Vec::new(),
    };

    apply_protection(
        plan,
        state.upsell(),
        cart.as_ref(),
        &product_tags,
        form.protection_opted_in(),
    );
}

/// Run the injection decision against an add plan and append the protection
/// line to it when eligible. Returns whether a line was appended.
fn apply_protection(
    plan: &mut MutationPlan,
    injector: &UpsellInjector,
    cart: Option<&Cart>,
    product_tags: &[String],
    opted_in: bool,
) -> bool {
    let Some(lines) = plan.add_lines() else {
        return false;
    };

    let mut enriched = lines.to_vec();
    let injected = injector.inject(&mut enriched, cart, product_tags, opted_in);

    if injected {
        let extra = enriched.split_off(lines.len());
        plan.extend_add_lines(extra);
    }
    injected
}

/// Current cart snapshot.
#[instrument(skip(state, jar))]
pub async fn show(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<Json<CartResponse>, AppError> {
    let Some(cart_id) = session::cart_id(&jar) else {
        return Ok(Json(CartResponse::empty()));
    };

    match state.commerce().cart(&cart_id).await {
        Ok(cart) => Ok(Json(CartResponse {
            cart: Some(cart),
            errors: Vec::new(),
        })),
        Err(e) => {
            // A stale or purged cart reads as empty, not as a failure
            tracing::warn!(error = %e, "Failed to fetch cart");
            Ok(Json(CartResponse::empty()))
        }
    }
}

/// Cart count badge (HTMX).
#[instrument(skip(state, jar))]
pub async fn count(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Json<CartCountResponse> {
    let count = match session::cart_id(&jar) {
        Some(cart_id) => state
            .commerce()
            .cart(&cart_id)
            .await
            .map(|cart| cart.total_quantity)
            .unwrap_or(0),
        None => 0,
    };

    Json(CartCountResponse { count })
}

/// Redirect to the remote checkout.
#[instrument(skip(state, jar))]
pub async fn checkout(State(state): State<AppState>, jar: SignedCookieJar) -> Response {
    let Some(cart_id) = session::cart_id(&jar) else {
        return Redirect::to("/cart").into_response();
    };

    match state.commerce().cart(&cart_id).await {
        Ok(cart) => Redirect::to(&cart.checkout_url).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to get cart for checkout");
            Redirect::to("/cart").into_response()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum_extra::extract::cookie::Key;

    use crate::commerce::types::fixtures::sample_cart;
    use crate::commerce::{CartLineInput, CartUserError};
    use crate::config::UpsellConfig;

    use super::*;

    const PROTECTION_VARIANT: &str = "gid://shopify/ProductVariant/777";

    fn protection_injector() -> UpsellInjector {
        UpsellInjector::new(Some(UpsellConfig {
            variant_id: PROTECTION_VARIANT.to_string(),
            exclusion_tag: "no-protection".to_string(),
        }))
    }

    fn add_plan() -> MutationPlan {
        MutationPlan::LinesAdd {
            cart_id: "gid://shopify/Cart/abc".to_string(),
            lines: vec![CartLineInput {
                merchandise_id: "gid://shopify/ProductVariant/1".to_string(),
                quantity: 1,
                attributes: None,
            }],
        }
    }

    #[test]
    fn test_persist_cart_id_adopts_new_identifier() {
        let jar = session::with_cart_id(
            SignedCookieJar::new(Key::generate()),
            "gid://shopify/Cart/old",
            false,
        );

        let mut cart = sample_cart();
        cart.id = "gid://shopify/Cart/999".to_string();

        let jar = persist_cart_id(jar, Some(&cart), false);
        assert_eq!(
            session::cart_id(&jar),
            Some("gid://shopify/Cart/999".to_string())
        );
    }

    #[test]
    fn test_persist_cart_id_keeps_session_when_no_cart_returned() {
        let jar = session::with_cart_id(
            SignedCookieJar::new(Key::generate()),
            "gid://shopify/Cart/old",
            false,
        );

        let jar = persist_cart_id(jar, None, false);
        assert_eq!(
            session::cart_id(&jar),
            Some("gid://shopify/Cart/old".to_string())
        );
    }

    #[test]
    fn test_cart_response_surfaces_user_errors_with_cart() {
        let mutation = CartMutation {
            cart: Some(sample_cart()),
            user_errors: vec![CartUserError::message("Discount code is invalid")],
        };

        let response = CartResponse::from(mutation);
        assert!(response.cart.is_some());
        assert_eq!(response.errors, vec!["Discount code is invalid"]);
    }

    #[test]
    fn test_apply_protection_extends_add_plan_in_place() {
        let mut plan = add_plan();
        let injected = apply_protection(
            &mut plan,
            &protection_injector(),
            Some(&sample_cart()),
            &[],
            true,
        );

        assert!(injected);
        let lines = plan.add_lines().unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines.last().unwrap().merchandise_id, PROTECTION_VARIANT);
        assert_eq!(lines.last().unwrap().quantity, 1);
    }

    #[test]
    fn test_apply_protection_leaves_plan_alone_when_excluded() {
        let tags = vec!["no-protection".to_string()];
        let mut plan = add_plan();
        let injected = apply_protection(&mut plan, &protection_injector(), None, &tags, true);

        assert!(!injected);
        assert_eq!(plan.add_lines().unwrap().len(), 1);
    }

    #[test]
    fn test_apply_protection_ignores_non_add_plans() {
        let mut plan = MutationPlan::LinesRemove {
            cart_id: "gid://shopify/Cart/abc".to_string(),
            line_ids: vec!["gid://shopify/CartLine/1".to_string()],
        };
        let injected = apply_protection(&mut plan, &protection_injector(), None, &[], true);

        assert!(!injected);
        assert_eq!(plan, MutationPlan::LinesRemove {
            cart_id: "gid://shopify/Cart/abc".to_string(),
            line_ids: vec!["gid://shopify/CartLine/1".to_string()],
        });
    }
}
