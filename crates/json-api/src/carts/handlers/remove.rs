//! Remove Cart Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    carts::{errors::into_status_error, models::CartChangedResponse, requests::parse_product_id},
    extensions::*,
    observability::record_cart_mutation,
    state::State,
};

/// Remove Cart Item Handler
#[endpoint(
    tags("cart"),
    summary = "Remove Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Item removed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid product ID"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::NOT_FOUND, description = "Item not found in cart"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product_id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<CartChangedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let product = parse_product_id(&product_id.into_inner())?;

    let result = state
        .app
        .carts
        .remove_item(principal.user_uuid, product)
        .await;

    record_cart_mutation("remove", result.is_ok());

    let cart = result.map_err(into_status_error)?;

    tracing::info!(user_uuid = %principal.user_uuid, product_uuid = %product, "removed cart item");

    Ok(Json(CartChangedResponse::new(
        "Item removed from cart successfully",
        cart,
    )))
}
