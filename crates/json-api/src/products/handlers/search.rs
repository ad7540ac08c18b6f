//! Product Search Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use storefront_app::domain::products::filter::ProductFilter;

use crate::{
    extensions::*,
    products::{
        errors::into_status_error, get::ProductResponse, requests::ProductListQuery,
    },
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SearchResponse {
    /// Matching products on the requested page
    pub products: Vec<ProductResponse>,

    /// The trimmed search term
    pub query: String,

    /// Number of products returned
    pub total: usize,
}

/// Product Search Handler
///
/// Searches product names, descriptions and brands for `q`. Accepts the same
/// filter, sort and paging parameters as the product index.
#[endpoint(
    tags("products"),
    summary = "Search Products",
    responses(
        (status_code = StatusCode::OK, description = "Matching products"),
        (status_code = StatusCode::BAD_REQUEST, description = "Search query too short"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<SearchResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let mut query = req
        .parse_queries::<ProductListQuery>()
        .map_err(|error| StatusError::bad_request().brief(error.to_string()))?;

    let term = query.q.take().unwrap_or_default();

    let filter = ProductFilter::for_search(&term, query.into()).map_err(into_status_error)?;
    let term = filter.search.clone().unwrap_or_default();

    let products = state
        .app
        .products
        .list_products(filter)
        .await
        .map_err(into_status_error)?
        .products;

    Ok(Json(SearchResponse {
        total: products.len(),
        products: products.into_iter().map(Into::into).collect(),
        query: term,
    }))
}
