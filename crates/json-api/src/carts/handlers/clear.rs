//! Clear Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::{errors::into_status_error, models::CartChangedResponse},
    extensions::*,
    observability::record_cart_mutation,
    state::State,
};

/// Clear Cart Handler
#[endpoint(
    tags("cart"),
    summary = "Clear Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart cleared"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartChangedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let result = state
        .app
        .carts
        .clear_cart(principal.user_uuid)
        .await;

    record_cart_mutation("clear", result.is_ok());

    let cart = result.map_err(into_status_error)?;

    Ok(Json(CartChangedResponse::new("Cart cleared successfully", cart)))
}
