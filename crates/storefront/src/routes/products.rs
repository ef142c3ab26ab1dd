//! Product route handlers.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Serialize;
use tracing::instrument;

use crate::catalog;
use crate::commerce::{CommerceError, Product, ProductVariant};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Product detail with the variant the current selection resolves to.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub product: Product,
    /// Variant selected by the URL's option parameters, after fallback.
    pub selected_variant: Option<ProductVariant>,
}

/// Product detail page data.
///
/// Query parameters name option values (`?Size=Large&Scent=Pine`); the
/// resolver picks the variant deterministically even when the selection is
/// partial or matches nothing.
#[instrument(skip(state, params), fields(handle = %handle))]
pub async fn show(
    State(state): State<AppState>,
    Path(handle): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ProductResponse>> {
    if handle.is_empty() {
        return Err(AppError::BadRequest("missing product handle".to_string()));
    }

    let product = match state.commerce().product_by_handle(&handle).await {
        Ok(product) => product,
        Err(CommerceError::NotFound(_)) => {
            return Err(AppError::NotFound(format!("product: {handle}")));
        }
        Err(e) => return Err(e.into()),
    };

    let selection = catalog::selection_from_params(&product, &params);
    let selected_variant = catalog::resolve_variant(&product, &selection).cloned();

    Ok(Json(ProductResponse {
        product: (*product).clone(),
        selected_variant,
    }))
}
