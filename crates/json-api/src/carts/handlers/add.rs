//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    carts::{
        errors::into_status_error,
        models::CartChangedResponse,
        requests::{parse_product_id, parse_quantity, required},
    },
    extensions::*,
    observability::record_cart_mutation,
    state::State,
};

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddCartItemRequest {
    /// Product UUID
    pub product_id: Option<String>,

    /// Units to add, 1 to 10; defaults to 1
    pub quantity: Option<i64>,
}

/// Add Cart Item Handler
///
/// Adds units of a product, merging with an existing line for the same
/// product.
#[endpoint(
    tags("cart"),
    summary = "Add Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Item added"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid request or insufficient stock"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found or unavailable"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "cart.add",
    skip(json, depot),
    fields(
        user_uuid = tracing::field::Empty,
        product_uuid = tracing::field::Empty,
        quantity = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<AddCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartChangedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let request = json.into_inner();

    let product_id = required(request.product_id)
        .ok_or_else(|| StatusError::bad_request().brief("Product ID is required"))?;

    let product = parse_product_id(&product_id)?;
    let quantity = parse_quantity(request.quantity.unwrap_or(1), 1)?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(principal.user_uuid));
    span.record("product_uuid", tracing::field::display(product));
    span.record("quantity", quantity);

    let result = state
        .app
        .carts
        .add_item(principal.user_uuid, product, quantity)
        .await;

    record_cart_mutation("add", result.is_ok());

    let cart = result.map_err(into_status_error)?;

    Ok(Json(CartChangedResponse::new(
        "Item added to cart successfully",
        cart,
    )))
}
