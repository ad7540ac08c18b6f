//! Delete Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    products::{errors::into_status_error, requests::parse_product_id},
    state::State,
};

/// Product Deleted Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductDeletedResponse {
    pub message: String,
}

/// Delete Product Handler
#[endpoint(
    tags("products"),
    summary = "Delete Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product deleted"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid product ID"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin privileges required"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.delete",
    skip(product, depot),
    fields(product_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    product: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<ProductDeletedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let product = parse_product_id(&product.into_inner())?;

    tracing::Span::current().record("product_uuid", tracing::field::display(product));

    state
        .app
        .products
        .delete_product(product)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductDeletedResponse {
        message: "Product deleted successfully".to_string(),
    }))
}
