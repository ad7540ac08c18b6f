//! Featured Products Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::products::filter::ProductFilter;

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct FeaturedProductsResponse {
    /// Newest featured products first
    pub products: Vec<ProductResponse>,
}

/// Featured Products Handler
#[endpoint(
    tags("products"),
    summary = "Featured Products",
    responses(
        (status_code = StatusCode::OK, description = "Featured products"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid limit"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<FeaturedProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = ProductFilter::featured(limit.into_inner()).map_err(into_status_error)?;

    let page = state
        .app
        .products
        .list_products(filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(FeaturedProductsResponse {
        products: page.products.into_iter().map(Into::into).collect(),
    }))
}
